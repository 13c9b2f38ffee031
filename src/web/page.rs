//! The fixed HTML control page and its HTTP envelope.

use crate::duty::DutyCycle;

/// Render the full HTTP response: status line, headers, blank line, page.
pub fn render_response(duty: DutyCycle) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str("HTTP/1.1 200 OK\r\n");
    out.push_str("Content-type: text/html\r\n");
    out.push_str("Connection: close\r\n");
    out.push_str("\r\n");
    out.push_str(&render_page(duty));
    out.push_str("\r\n");
    out
}

/// Render just the HTML document: a heading and the three control links,
/// with the current duty interpolated into the PWM button label.
pub fn render_page(duty: DutyCycle) -> String {
    let mut html = String::with_capacity(768);
    html.push_str("<!DOCTYPE html><html>\r\n");
    html.push_str(
        "<head><meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\r\n",
    );
    html.push_str("<link rel=\"icon\" href=\"data:,\">\r\n");
    html.push_str(
        "<style>html { font-family: Helvetica; display: inline-block; \
         margin: 0px auto; text-align: center;}\r\n",
    );
    html.push_str(
        ".button { background-color: #4CAF50; border: none; color: white; \
         padding: 16px 40px;\r\n",
    );
    html.push_str(
        "text-decoration: none; font-size: 30px; margin: 2px; cursor: pointer;}\
         </style></head>\r\n",
    );
    html.push_str("<body><h1>ESP32 PWM Web Server</h1>\r\n<br>\r\n");
    html.push_str("<p><a href=\"/+p\"><button class=\"button\">+</button></a></p>\r\n");
    html.push_str(&format!(
        "<p><a href=\"/PWM\"><button class=\"button\">PWM({duty})</button></a></p>\r\n"
    ));
    html.push_str("<p><a href=\"/-p\"><button class=\"button\">-</button></a></p>\r\n");
    html.push_str("<br>\r\n</body></html>\r\n");
    html
}
