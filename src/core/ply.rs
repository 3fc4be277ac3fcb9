// Minimal PLY reader: ascii and binary (both endians), vertex positions plus
// polygon faces. Faces with more than three corners are fan-triangulated.

use glam::Vec3;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PlyError {
    #[error("missing `ply` magic line")]
    MissingMagic,
    #[error("unsupported PLY format `{0}`")]
    UnsupportedFormat(String),
    #[error("malformed header: {0}")]
    MalformedHeader(String),
    #[error("unknown property type `{0}`")]
    UnknownType(String),
    #[error("vertex element lacks x/y/z properties")]
    MissingPosition,
    #[error("unexpected end of data while reading {0}")]
    UnexpectedEof(&'static str),
    #[error("invalid ascii value `{0}`")]
    InvalidValue(String),
    #[error("face index {index} out of range for {count} vertices")]
    IndexOutOfRange { index: u32, count: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Encoding {
    Ascii,
    BinaryLittleEndian,
    BinaryBigEndian,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scalar {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    F32,
    F64,
}

impl Scalar {
    fn parse(name: &str) -> Result<Self, PlyError> {
        Ok(match name {
            "char" | "int8" => Scalar::I8,
            "uchar" | "uint8" => Scalar::U8,
            "short" | "int16" => Scalar::I16,
            "ushort" | "uint16" => Scalar::U16,
            "int" | "int32" => Scalar::I32,
            "uint" | "uint32" => Scalar::U32,
            "float" | "float32" => Scalar::F32,
            "double" | "float64" => Scalar::F64,
            other => return Err(PlyError::UnknownType(other.to_string())),
        })
    }

    fn size(self) -> usize {
        match self {
            Scalar::I8 | Scalar::U8 => 1,
            Scalar::I16 | Scalar::U16 => 2,
            Scalar::I32 | Scalar::U32 | Scalar::F32 => 4,
            Scalar::F64 => 8,
        }
    }
}

#[derive(Clone, Debug)]
enum PropertyKind {
    Scalar(Scalar),
    List { count: Scalar, item: Scalar },
}

#[derive(Clone, Debug)]
struct Property {
    name: String,
    kind: PropertyKind,
}

#[derive(Clone, Debug)]
struct Element {
    name: String,
    count: usize,
    properties: Vec<Property>,
}

/// Decoded triangle mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlyMesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

struct Header {
    encoding: Encoding,
    elements: Vec<Element>,
    body_offset: usize,
}

fn parse_header(bytes: &[u8]) -> Result<Header, PlyError> {
    const END: &[u8] = b"end_header";
    let end = bytes
        .windows(END.len())
        .position(|w| w == END)
        .ok_or_else(|| PlyError::MalformedHeader("no end_header".into()))?;
    let mut body_offset = end + END.len();
    // skip the rest of the end_header line, tolerating \r\n
    while body_offset < bytes.len() && bytes[body_offset] != b'\n' {
        body_offset += 1;
    }
    body_offset = (body_offset + 1).min(bytes.len());

    let text = std::str::from_utf8(&bytes[..end])
        .map_err(|_| PlyError::MalformedHeader("header is not utf-8".into()))?;
    let mut lines = text.lines().map(str::trim);
    if lines.next() != Some("ply") {
        return Err(PlyError::MissingMagic);
    }

    let mut encoding = None;
    let mut elements: Vec<Element> = Vec::new();
    for line in lines {
        let mut tok = line.split_whitespace();
        match tok.next() {
            None | Some("comment") | Some("obj_info") => {}
            Some("format") => {
                let name = tok.next().unwrap_or("");
                encoding = Some(match name {
                    "ascii" => Encoding::Ascii,
                    "binary_little_endian" => Encoding::BinaryLittleEndian,
                    "binary_big_endian" => Encoding::BinaryBigEndian,
                    other => return Err(PlyError::UnsupportedFormat(other.to_string())),
                });
            }
            Some("element") => {
                let name = tok
                    .next()
                    .ok_or_else(|| PlyError::MalformedHeader(line.to_string()))?;
                let count = tok
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| PlyError::MalformedHeader(line.to_string()))?;
                elements.push(Element {
                    name: name.to_string(),
                    count,
                    properties: Vec::new(),
                });
            }
            Some("property") => {
                let element = elements
                    .last_mut()
                    .ok_or_else(|| PlyError::MalformedHeader("property before element".into()))?;
                let first = tok
                    .next()
                    .ok_or_else(|| PlyError::MalformedHeader(line.to_string()))?;
                let kind = if first == "list" {
                    let count = Scalar::parse(tok.next().unwrap_or(""))?;
                    let item = Scalar::parse(tok.next().unwrap_or(""))?;
                    PropertyKind::List { count, item }
                } else {
                    PropertyKind::Scalar(Scalar::parse(first)?)
                };
                let name = tok
                    .next()
                    .ok_or_else(|| PlyError::MalformedHeader(line.to_string()))?;
                element.properties.push(Property {
                    name: name.to_string(),
                    kind,
                });
            }
            Some(other) => {
                return Err(PlyError::MalformedHeader(format!("unknown keyword `{other}`")))
            }
        }
    }

    let encoding =
        encoding.ok_or_else(|| PlyError::MalformedHeader("missing format line".into()))?;
    Ok(Header {
        encoding,
        elements,
        body_offset,
    })
}

/// Source of property values for either encoding.
trait ValueReader {
    fn read(&mut self, ty: Scalar) -> Result<f64, PlyError>;
}

struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
    big_endian: bool,
}

impl<'a> ValueReader for BinaryReader<'a> {
    fn read(&mut self, ty: Scalar) -> Result<f64, PlyError> {
        let n = ty.size();
        let raw = self
            .data
            .get(self.pos..self.pos + n)
            .ok_or(PlyError::UnexpectedEof("binary body"))?;
        self.pos += n;
        let mut buf = [0u8; 8];
        buf[..n].copy_from_slice(raw);
        if self.big_endian {
            buf[..n].reverse();
        }
        Ok(match ty {
            Scalar::I8 => buf[0] as i8 as f64,
            Scalar::U8 => buf[0] as f64,
            Scalar::I16 => i16::from_le_bytes([buf[0], buf[1]]) as f64,
            Scalar::U16 => u16::from_le_bytes([buf[0], buf[1]]) as f64,
            Scalar::I32 => i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as f64,
            Scalar::U32 => u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as f64,
            Scalar::F32 => f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]) as f64,
            Scalar::F64 => f64::from_le_bytes(buf),
        })
    }
}

struct AsciiReader<'a> {
    tokens: std::str::SplitAsciiWhitespace<'a>,
}

impl<'a> ValueReader for AsciiReader<'a> {
    fn read(&mut self, _ty: Scalar) -> Result<f64, PlyError> {
        let tok = self
            .tokens
            .next()
            .ok_or(PlyError::UnexpectedEof("ascii body"))?;
        tok.parse::<f64>()
            .map_err(|_| PlyError::InvalidValue(tok.to_string()))
    }
}

/// Records are at least one byte long in either encoding, so the body length
/// bounds how many of them can really follow.
fn capacity_hint(count: usize, body_len: usize) -> usize {
    count.min(body_len)
}

fn read_body(
    header: &Header,
    reader: &mut dyn ValueReader,
    body_len: usize,
) -> Result<PlyMesh, PlyError> {
    let mut mesh = PlyMesh::default();
    let mut vertex_count = 0usize;
    let mut corners: Vec<u32> = Vec::with_capacity(8);

    for element in &header.elements {
        match element.name.as_str() {
            "vertex" => {
                let slot = |axis: &str| element.properties.iter().position(|p| p.name == axis);
                let (xi, yi, zi) = match (slot("x"), slot("y"), slot("z")) {
                    (Some(x), Some(y), Some(z)) => (x, y, z),
                    _ => return Err(PlyError::MissingPosition),
                };
                vertex_count = element.count;
                mesh.positions.reserve(capacity_hint(element.count, body_len));
                let mut xyz = [0.0f32; 3];
                for _ in 0..element.count {
                    for (pi, prop) in element.properties.iter().enumerate() {
                        match prop.kind {
                            PropertyKind::Scalar(ty) => {
                                let v = reader.read(ty)? as f32;
                                if pi == xi {
                                    xyz[0] = v;
                                } else if pi == yi {
                                    xyz[1] = v;
                                } else if pi == zi {
                                    xyz[2] = v;
                                }
                            }
                            PropertyKind::List { count, item } => {
                                let n = reader.read(count)? as usize;
                                for _ in 0..n {
                                    reader.read(item)?;
                                }
                            }
                        }
                    }
                    mesh.positions.push(Vec3::from(xyz));
                }
            }
            "face" => {
                let corner_slots = element.count.checked_mul(3).ok_or_else(|| {
                    PlyError::MalformedHeader(format!("face count {} too large", element.count))
                })?;
                mesh.indices
                    .reserve(capacity_hint(corner_slots, body_len.saturating_mul(3)));
                for _ in 0..element.count {
                    for prop in &element.properties {
                        match prop.kind {
                            PropertyKind::List { count, item } => {
                                let n = reader.read(count)? as usize;
                                let is_indices =
                                    prop.name == "vertex_indices" || prop.name == "vertex_index";
                                corners.clear();
                                for _ in 0..n {
                                    let v = reader.read(item)?;
                                    if is_indices {
                                        if v < 0.0 || v.fract() != 0.0 || v > u32::MAX as f64 {
                                            return Err(PlyError::InvalidValue(format!(
                                                "vertex index {v}"
                                            )));
                                        }
                                        corners.push(v as u32);
                                    }
                                }
                                if is_indices {
                                    for k in 1..corners.len().saturating_sub(1) {
                                        mesh.indices.extend_from_slice(&[
                                            corners[0],
                                            corners[k],
                                            corners[k + 1],
                                        ]);
                                    }
                                }
                            }
                            PropertyKind::Scalar(ty) => {
                                reader.read(ty)?;
                            }
                        }
                    }
                }
            }
            _ => {
                for _ in 0..element.count {
                    for prop in &element.properties {
                        match prop.kind {
                            PropertyKind::Scalar(ty) => {
                                reader.read(ty)?;
                            }
                            PropertyKind::List { count, item } => {
                                let n = reader.read(count)? as usize;
                                for _ in 0..n {
                                    reader.read(item)?;
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    if mesh.positions.is_empty() && !header.elements.iter().any(|e| e.name == "vertex") {
        return Err(PlyError::MissingPosition);
    }
    if let Some(&index) = mesh.indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(PlyError::IndexOutOfRange {
            index,
            count: vertex_count,
        });
    }
    Ok(mesh)
}

/// Decode a PLY file held in memory.
pub fn parse_ply(bytes: &[u8]) -> Result<PlyMesh, PlyError> {
    let header = parse_header(bytes)?;
    let body = &bytes[header.body_offset..];
    match header.encoding {
        Encoding::Ascii => {
            let text = std::str::from_utf8(body)
                .map_err(|_| PlyError::InvalidValue("non-utf-8 ascii body".into()))?;
            let mut reader = AsciiReader {
                tokens: text.split_ascii_whitespace(),
            };
            read_body(&header, &mut reader, body.len())
        }
        Encoding::BinaryLittleEndian | Encoding::BinaryBigEndian => {
            let mut reader = BinaryReader {
                data: body,
                pos: 0,
                big_endian: header.encoding == Encoding::BinaryBigEndian,
            };
            read_body(&header, &mut reader, body.len())
        }
    }
}
