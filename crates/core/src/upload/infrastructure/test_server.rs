use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

/// A request captured by [`serve_once`].
pub(crate) struct RecordedRequest {
    pub head: String,
    pub body: String,
}

impl RecordedRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim())
        })
    }

    pub fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    /// Decoded `application/x-www-form-urlencoded` value.
    pub fn form_value(&self, key: &str) -> Option<String> {
        self.body.split('&').find_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            if k != key {
                return None;
            }
            urlencoding::decode(&v.replace('+', " "))
                .ok()
                .map(|decoded| decoded.into_owned())
        })
    }
}

/// Accepts a single HTTP request on a loopback port and answers it with
/// `status` and a JSON `body`. Returns the base URL and a handle yielding
/// the recorded request.
pub(crate) fn serve_once(status: u16, body: &str) -> (String, JoinHandle<RecordedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let body = body.to_string();

    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let head_end = loop {
            let n = stream.read(&mut chunk).unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = find(&buf, b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (key, value) = line.split_once(':')?;
                key.trim()
                    .eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        while buf.len() < head_end + content_length {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let request_body = String::from_utf8_lossy(&buf[head_end..]).to_string();

        let response = format!(
            "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            reason(status),
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        RecordedRequest {
            head,
            body: request_body,
        }
    });

    (url, handle)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorded(body: &str) -> RecordedRequest {
        RecordedRequest {
            head: "POST /upload HTTP/1.1\r\nContent-Type: application/x-www-form-urlencoded\r\n\r\n"
                .to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_form_value_decodes_plus_and_escapes() {
        let request = recorded("title=My+Uploaded+Image&file=data%3Aimage%2Fjpeg%3Bbase64%2CAA%3D%3D");
        assert_eq!(request.form_value("title").as_deref(), Some("My Uploaded Image"));
        assert_eq!(
            request.form_value("file").as_deref(),
            Some("data:image/jpeg;base64,AA==")
        );
        assert!(request.form_value("missing").is_none());
    }

    #[test]
    fn test_form_value_keeps_malformed_escape() {
        let request = recorded("note=100%25&raw=100%");
        assert_eq!(request.form_value("note").as_deref(), Some("100%"));
        assert_eq!(request.form_value("raw").as_deref(), Some("100%"));
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = recorded("");
        assert_eq!(
            request.header("content-type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(request.request_line(), "POST /upload HTTP/1.1");
    }
}
