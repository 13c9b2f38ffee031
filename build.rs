fn main() {
    // ESP-IDF toolchain environment propagation. On host targets this
    // finds no exported sysenv and emits nothing.
    embuild::espidf::sysenv::output();
}
