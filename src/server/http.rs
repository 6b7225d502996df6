use serde::Serialize;
use std::collections::HashMap;
use std::io::{self, BufRead, Read, Write};
use thiserror::Error;

const MAX_HEADER_LINES: usize = 100;
const MAX_REQUEST_BYTES: u64 = 8192;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("connection error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed request: {0}")]
    Malformed(String),
}

/// The parts of an HTTP/1.1 request the server looks at.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: String,
    /// Percent-decoded path without the query string.
    pub path: String,
    pub query: HashMap<String, String>,
}

impl HttpRequest {
    #[cfg(test)]
    pub fn get(target: &str) -> Self {
        let (path, query) = split_target(target);
        Self {
            method: "GET".to_string(),
            path,
            query,
        }
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}

/// Read the request line and skip the headers. Bodies are never read.
/// Everything before the blank line must fit in `MAX_REQUEST_BYTES`.
pub fn read_request<R: BufRead>(reader: &mut R) -> Result<HttpRequest, HttpError> {
    let mut reader = Read::take(reader, MAX_REQUEST_BYTES);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line)? == 0 {
        return Err(HttpError::Malformed("empty request".to_string()));
    }
    if !request_line.ends_with('\n') {
        return Err(HttpError::Malformed("request line too long".to_string()));
    }

    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(HttpError::Malformed(format!(
            "bad request line {:?}",
            request_line.trim_end()
        )));
    };
    if !version.starts_with("HTTP/") {
        return Err(HttpError::Malformed(format!("bad version {:?}", version)));
    }

    let mut header_lines = 0;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        if !line.ends_with('\n') {
            return Err(HttpError::Malformed("headers too long".to_string()));
        }
        if line.trim_end().is_empty() {
            break;
        }
        header_lines += 1;
        if header_lines > MAX_HEADER_LINES {
            return Err(HttpError::Malformed("too many headers".to_string()));
        }
    }

    let (path, query) = split_target(target);
    Ok(HttpRequest {
        method: method.to_string(),
        path,
        query,
    })
}

fn split_target(target: &str) -> (String, HashMap<String, String>) {
    match target.split_once('?') {
        Some((path, query)) => (percent_decode(path), parse_query(query)),
        None => (percent_decode(target), HashMap::new()),
    }
}

/// First occurrence of a key wins.
pub fn parse_query(query: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params
            .entry(percent_decode(&key.replace('+', " ")))
            .or_insert_with(|| percent_decode(&value.replace('+', " ")));
    }
    params
}

/// Decode `%XX` escapes. Invalid escapes are kept literally.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn json<T: Serialize>(status: u16, payload: &T) -> Self {
        match serde_json::to_vec(payload) {
            Ok(body) => Self {
                status,
                content_type: "application/json",
                body,
            },
            Err(_) => Self::text(500, "failed to encode response"),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn file(content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type,
            body,
        }
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(
            writer,
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status,
            reason_phrase(self.status),
            self.content_type,
            self.body.len()
        )?;
        writer.write_all(&self.body)?;
        writer.flush()
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        503 => "Service Unavailable",
        _ => "Internal Server Error",
    }
}

pub fn content_type_for(path: &str) -> &'static str {
    let extension = path.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("ttf") => "font/ttf",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_request_line_and_query() {
        let raw = "GET /api/createGame?difficulty=hard HTTP/1.1\r\nHost: localhost\r\nAccept: */*\r\n\r\n";
        let request = read_request(&mut Cursor::new(raw)).unwrap();

        assert_eq!(request.method, "GET");
        assert_eq!(request.path, "/api/createGame");
        assert_eq!(request.query_param("difficulty"), Some("hard"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            read_request(&mut Cursor::new("hello\r\n\r\n")),
            Err(HttpError::Malformed(_))
        ));
        assert!(matches!(
            read_request(&mut Cursor::new("")),
            Err(HttpError::Malformed(_))
        ));
        assert!(matches!(
            read_request(&mut Cursor::new("GET / FTP/1.0\r\n\r\n")),
            Err(HttpError::Malformed(_))
        ));
    }

    #[test]
    fn test_oversized_requests_are_rejected() {
        // a request line that never ends
        let endless = format!("GET /{}", "a".repeat(10_000));
        assert!(matches!(
            read_request(&mut Cursor::new(endless)),
            Err(HttpError::Malformed(_))
        ));

        let mut padded = String::from("GET / HTTP/1.1\r\n");
        for i in 0..50 {
            padded.push_str(&format!("X-Filler-{:02}: {}\r\n", i, "a".repeat(200)));
        }
        padded.push_str("\r\n");
        assert!(matches!(
            read_request(&mut Cursor::new(padded)),
            Err(HttpError::Malformed(_))
        ));
    }

    #[test]
    fn test_query_decoding() {
        let query = parse_query("gameid=a%2Db&name=Mr+Sea&flag&gameid=second");

        assert_eq!(query.get("gameid").map(String::as_str), Some("a-b"));
        assert_eq!(query.get("name").map(String::as_str), Some("Mr Sea"));
        assert_eq!(query.get("flag").map(String::as_str), Some(""));
    }

    #[test]
    fn test_percent_decode_keeps_bad_escapes() {
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("%41%42"), "AB");
    }

    #[test]
    fn test_response_wire_format() {
        let mut out = Vec::new();
        HttpResponse::text(404, "nope").write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(text.contains("Content-Length: 4\r\n"));
        assert!(text.ends_with("\r\n\r\nnope"));
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for("index.html"), "text/html; charset=utf-8");
        assert_eq!(content_type_for("sprites/sprite1.PNG"), "image/png");
        assert_eq!(content_type_for("LICENSE"), "application/octet-stream");
    }
}
