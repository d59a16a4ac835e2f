//! Export of turtle output to standard 3D file formats.
//!
//! Supports OBJ (text, with per-vertex colors) and GLB (binary glTF 2.0).
//! These are plain data conversions: write the result wherever you like.

use std::fmt::{self, Write as _};

use bevy::math::Vec3;

use crate::mesh::{ColoredTriangle, TriangleList};

/// A file format a [`TriangleList`] can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Wavefront OBJ with `v x y z r g b` vertex colors.
    Obj,
    /// Binary glTF 2.0.
    Glb,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Obj => "obj",
            Self::Glb => "glb",
        }
    }

    /// Encodes `triangles` as the bytes of a complete file.
    pub fn encode(self, triangles: &TriangleList, object_name: &str) -> Vec<u8> {
        match self {
            Self::Obj => triangles_to_obj(triangles, object_name).into_bytes(),
            Self::Glb => triangles_to_glb(triangles, object_name),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Obj => "OBJ",
            Self::Glb => "GLB",
        })
    }
}

// ---------------------------------------------------------------------------
// OBJ Export
// ---------------------------------------------------------------------------

/// Converts a triangle list to OBJ text.
///
/// Every triangle contributes three `v x y z r g b` lines (the common vertex
/// color extension), three `vn` lines and one `f a//a b//b c//c` face.
pub fn triangles_to_obj(triangles: &TriangleList, object_name: &str) -> String {
    let mut obj = String::new();
    let _ = writeln!(obj, "o {}", object_name);

    for triangle in triangles {
        for (pos, color) in triangle.positions.iter().zip(&triangle.colors) {
            let _ = writeln!(
                obj,
                "v {} {} {} {} {} {}",
                pos.x, pos.y, pos.z, color.x, color.y, color.z
            );
        }
    }

    for triangle in triangles {
        for norm in &triangle.normals {
            let _ = writeln!(obj, "vn {} {} {}", norm.x, norm.y, norm.z);
        }
    }

    for index in 0..triangles.len() {
        let a = index * 3 + 1;
        let (b, c) = (a + 1, a + 2);
        let _ = writeln!(obj, "f {}//{} {}//{} {}//{}", a, a, b, b, c, c);
    }

    obj
}

// ---------------------------------------------------------------------------
// GLB (Binary glTF 2.0) Export
// ---------------------------------------------------------------------------

/// Converts a triangle list to GLB (binary glTF 2.0).
///
/// The result holds one non-indexed mesh with `POSITION`, `NORMAL` and
/// linear `COLOR_0` attributes and a single rough, non-metallic material that lets
/// the vertex colors show through.
pub fn triangles_to_glb(triangles: &TriangleList, object_name: &str) -> Vec<u8> {
    let Some((min, max)) = triangles.bounds() else {
        return build_empty_glb();
    };
    let vertex_count = triangles.len() * 3;

    let mut bin_buffer: Vec<u8> = Vec::with_capacity(vertex_count * 36);
    let mut buffer_views = Vec::new();
    let mut accessors = Vec::new();

    // Positions, normals and colors are all VEC3 float streams.
    let streams: [(&str, fn(&ColoredTriangle) -> [Vec3; 3]); 3] = [
        ("POSITION", |t| t.positions),
        ("NORMAL", |t| t.normals),
        ("COLOR_0", |t| t.linear_colors()),
    ];
    let mut attr_entries = Vec::new();

    for (attribute, select) in streams {
        let offset = bin_buffer.len();
        for triangle in triangles {
            for v in select(triangle) {
                bin_buffer.extend_from_slice(&v.x.to_le_bytes());
                bin_buffer.extend_from_slice(&v.y.to_le_bytes());
                bin_buffer.extend_from_slice(&v.z.to_le_bytes());
            }
        }
        let length = bin_buffer.len() - offset;

        buffer_views.push(format!(
            "{{\"buffer\":0,\"byteOffset\":{},\"byteLength\":{},\"target\":34962}}",
            offset, length
        ));
        attr_entries.push(format!("\"{}\":{}", attribute, accessors.len()));

        // The POSITION accessor must carry bounds.
        let bounds = if attribute == "POSITION" {
            format!(
                ",\"min\":[{:.6},{:.6},{:.6}],\"max\":[{:.6},{:.6},{:.6}]",
                min.x, min.y, min.z, max.x, max.y, max.z
            )
        } else {
            String::new()
        };
        accessors.push(format!(
            "{{\"bufferView\":{},\"componentType\":5126,\"count\":{},\"type\":\"VEC3\"{}}}",
            buffer_views.len() - 1,
            vertex_count,
            bounds
        ));
    }

    let json = format!(
        concat!(
            "{{",
            "\"asset\":{{\"version\":\"2.0\",\"generator\":\"bevy_lindenmayer\"}},",
            "\"scene\":0,",
            "\"scenes\":[{{\"name\":\"LSystem\",\"nodes\":[0]}}],",
            "\"nodes\":[{{\"name\":\"{}\",\"mesh\":0}}],",
            "\"meshes\":[{{\"name\":\"{}\",\"primitives\":[{{\"attributes\":{{{}}},\"material\":0}}]}}],",
            "\"materials\":[{{\"name\":\"VertexColor\",\"pbrMetallicRoughness\":",
            "{{\"baseColorFactor\":[1.0,1.0,1.0,1.0],\"metallicFactor\":0.0,\"roughnessFactor\":0.8}}}}],",
            "\"accessors\":[{}],",
            "\"bufferViews\":[{}],",
            "\"buffers\":[{{\"byteLength\":{}}}]",
            "}}"
        ),
        escape_json(object_name),
        escape_json(object_name),
        attr_entries.join(","),
        accessors.join(","),
        buffer_views.join(","),
        bin_buffer.len(),
    );

    assemble_glb(&json, &bin_buffer)
}

fn escape_json(text: &str) -> String {
    text.chars()
        .flat_map(|c| match c {
            '"' => vec!['\\', '"'],
            '\\' => vec!['\\', '\\'],
            c if (c as u32) < 0x20 => vec![' '],
            c => vec![c],
        })
        .collect()
}

fn build_empty_glb() -> Vec<u8> {
    let json = r#"{"asset":{"version":"2.0","generator":"bevy_lindenmayer"},"scene":0,"scenes":[{"name":"Empty"}]}"#;
    assemble_glb(json, &[])
}

const GLB_MAGIC: &[u8; 4] = b"glTF";
const GLB_VERSION: u32 = 2;
const GLB_HEADER_LEN: usize = 12;

/// Appends one GLB chunk, padded to a 4-byte boundary with `pad`.
fn push_chunk(glb: &mut Vec<u8>, kind: &[u8; 4], data: &[u8], pad: u8) {
    let padded_len = data.len().next_multiple_of(4);
    glb.extend_from_slice(&(padded_len as u32).to_le_bytes());
    glb.extend_from_slice(kind);
    glb.extend_from_slice(data);
    glb.resize(glb.len() + padded_len - data.len(), pad);
}

/// Header, JSON chunk and (when there is geometry) BIN chunk.
fn assemble_glb(json: &str, bin_data: &[u8]) -> Vec<u8> {
    let mut glb = Vec::with_capacity(GLB_HEADER_LEN + 16 + json.len() + bin_data.len() + 6);
    glb.extend_from_slice(GLB_MAGIC);
    glb.extend_from_slice(&GLB_VERSION.to_le_bytes());
    // Total length, filled in once the chunks are written.
    glb.extend_from_slice(&0u32.to_le_bytes());

    push_chunk(&mut glb, b"JSON", json.as_bytes(), b' ');
    if !bin_data.is_empty() {
        push_chunk(&mut glb, b"BIN\0", bin_data, 0);
    }

    let total_len = glb.len() as u32;
    glb[8..GLB_HEADER_LEN].copy_from_slice(&total_len.to_le_bytes());
    glb
}
