#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER_SIZE: usize = 40;

pub fn with_u32_len(body: &[u8]) -> Vec<u8> {
    let mut buf = (body.len() as u32).to_be_bytes().to_vec();
    buf.extend_from_slice(body);
    buf
}

pub fn with_u16_len(body: &[u8]) -> Vec<u8> {
    let mut buf = (body.len() as u16).to_be_bytes().to_vec();
    buf.extend_from_slice(body);
    buf
}

pub fn with_u8_len(body: &[u8]) -> Vec<u8> {
    let mut buf = vec![body.len() as u8];
    buf.extend_from_slice(body);
    buf
}

/// Assemble a database file: header, body sections in order, optional extension block.
/// The header carries one boundary per body section after the first plus the extension
/// start (0 when absent).
pub fn container(magic: &[u8; 4], sections: &[Vec<u8>], extensions: Option<&[u8]>) -> Vec<u8> {
    let mut boundaries = Vec::new();
    let mut pos = HEADER_SIZE;
    for (i, s) in sections.iter().enumerate() {
        if i > 0 {
            boundaries.push(pos as u32);
        }
        pos += s.len();
    }
    boundaries.push(if extensions.is_some() { pos as u32 } else { 0 });

    let mut data = magic.to_vec();
    data.extend_from_slice(b"0200");
    for b in boundaries {
        data.extend_from_slice(&b.to_be_bytes());
    }
    data.resize(HEADER_SIZE, 0);
    for s in sections {
        data.extend_from_slice(s);
    }
    if let Some(ext) = extensions {
        data.extend_from_slice(ext);
    }
    data
}

/// Extension block with payloads laid out back to back after the entry table.
pub fn extension_block(entries: &[(u16, u16, Vec<u8>)]) -> Vec<u8> {
    let data_start = 12 + 12 * entries.len();
    let mut table = Vec::new();
    let mut payloads = Vec::new();
    for (type_tag, version_tag, payload) in entries {
        table.extend_from_slice(&type_tag.to_be_bytes());
        table.extend_from_slice(&version_tag.to_be_bytes());
        table.extend_from_slice(&((data_start + payloads.len()) as u32).to_be_bytes());
        table.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        payloads.extend_from_slice(payload);
    }

    let mut body = (data_start as u32).to_be_bytes().to_vec();
    body.extend_from_slice(&[0, 0, 0]);
    body.push(entries.len() as u8);
    body.extend(table);
    body.extend(payloads);
    with_u32_len(&body)
}

pub fn write_temp(data: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}
