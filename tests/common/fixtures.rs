//! Test fixtures: in-memory images and multipart bodies.

/// Encode 8-bit pixel data as PNG
pub fn png_bytes(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("PNG header");
        writer.write_image_data(data).expect("PNG data");
    }
    out
}

/// Grayscale PNG: left half black, right half white
pub fn split_gray_png(width: u32, height: u32) -> Vec<u8> {
    let data: Vec<u8> = (0..height)
        .flat_map(|_| (0..width).map(move |x| if x < width / 2 { 0 } else { 255 }))
        .collect();
    png_bytes(width, height, png::ColorType::Grayscale, &data)
}

/// Uniform grayscale PNG
pub fn flat_gray_png(width: u32, height: u32, value: u8) -> Vec<u8> {
    let data = vec![value; (width * height) as usize];
    png_bytes(width, height, png::ColorType::Grayscale, &data)
}

/// RGB PNG: left half `left`, right half `right`
pub fn two_color_png(width: u32, height: u32, left: [u8; 3], right: [u8; 3]) -> Vec<u8> {
    let data: Vec<u8> = (0..height)
        .flat_map(|_| (0..width).flat_map(move |x| if x < width / 2 { left } else { right }))
        .collect();
    png_bytes(width, height, png::ColorType::Rgb, &data)
}

/// Decode a PNG response into (width, height, color type, pixels)
pub fn decode_png(bytes: &[u8]) -> (u32, u32, png::ColorType, Vec<u8>) {
    let decoder = png::Decoder::new(bytes);
    let mut reader = decoder.read_info().expect("PNG info");
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).expect("PNG frame");
    buf.truncate(info.buffer_size());
    (info.width, info.height, info.color_type, buf)
}

const BOUNDARY: &str = "stixis-test-boundary";

/// Minimal multipart/form-data builder
#[derive(Default)]
pub struct MultipartForm {
    parts: Vec<(String, Option<String>, Vec<u8>)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts
            .push((name.to_string(), None, value.as_bytes().to_vec()));
        self
    }

    pub fn file(mut self, name: &str, filename: &str, data: Vec<u8>) -> Self {
        self.parts
            .push((name.to_string(), Some(filename.to_string()), data));
        self
    }

    /// (Content-Type header value, body)
    pub fn build(self) -> (String, Vec<u8>) {
        let mut body = Vec::new();
        for (name, filename, data) in self.parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match filename {
                Some(filename) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                }
                None => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                    );
                }
            }
            body.extend_from_slice(&data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        (format!("multipart/form-data; boundary={BOUNDARY}"), body)
    }
}
