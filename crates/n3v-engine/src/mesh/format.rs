//! `.n3v` binary codec.
//!
//! Little-endian, no magic, no version:
//!
//! ```text
//! u32     vertex_count
//! Vertex  vertices[vertex_count]   // f32 x,y,z; f32 r,g,b,a
//! u32     index_count
//! u16     indices[index_count]
//! ```
//!
//! Declared counts are checked against the blob length before anything is read.

use super::error::MeshError;
use super::vertex::Vertex;

/// Largest vertex count addressable by 16-bit indices.
pub const MAX_VERTICES: usize = u16::MAX as usize;

const COUNT_SIZE: usize = std::mem::size_of::<u32>();
const INDEX_SIZE: usize = std::mem::size_of::<u16>();
const FLOATS_PER_VERTEX: usize = 7;

/// Decodes and validates a mesh blob into `(vertices, indices)`.
pub fn decode(bytes: &[u8]) -> Result<(Vec<Vertex>, Vec<u16>), MeshError> {
    let mut r = Reader { bytes, offset: 0 };

    let vertex_count = r.read_count("vertex count")?;
    if vertex_count > MAX_VERTICES {
        return Err(MeshError::TooManyVertices { count: vertex_count, max: MAX_VERTICES });
    }

    let raw = r.take("vertex data", vertex_count, Vertex::SIZE)?;
    let vertices = raw.chunks_exact(Vertex::SIZE).map(read_vertex).collect();

    let index_count = r.read_count("index count")?;
    let raw = r.take("index data", index_count, INDEX_SIZE)?;
    let indices: Vec<u16> = raw
        .chunks_exact(INDEX_SIZE)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();

    if r.remaining() > 0 {
        log::debug!("ignoring {} trailing bytes after mesh indices", r.remaining());
    }

    validate(vertex_count, &indices)?;
    Ok((vertices, indices))
}

/// Encodes vertices and indices into the binary format.
pub fn encode(vertices: &[Vertex], indices: &[u16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(
        COUNT_SIZE * 2 + vertices.len() * Vertex::SIZE + indices.len() * INDEX_SIZE,
    );

    out.extend_from_slice(&(vertices.len() as u32).to_le_bytes());
    for v in vertices {
        for f in v.position.iter().chain(v.color.iter()) {
            out.extend_from_slice(&f.to_le_bytes());
        }
    }

    out.extend_from_slice(&(indices.len() as u32).to_le_bytes());
    for i in indices {
        out.extend_from_slice(&i.to_le_bytes());
    }

    out
}

/// Checks the index invariants shared by decoding and direct construction.
pub(super) fn validate(vertex_count: usize, indices: &[u16]) -> Result<(), MeshError> {
    if vertex_count > MAX_VERTICES {
        return Err(MeshError::TooManyVertices { count: vertex_count, max: MAX_VERTICES });
    }

    if !indices.len().is_multiple_of(3) {
        return Err(MeshError::PartialTriangle { count: indices.len() });
    }

    if let Some((position, &index)) = indices
        .iter()
        .enumerate()
        .find(|&(_, &i)| usize::from(i) >= vertex_count)
    {
        return Err(MeshError::IndexOutOfRange { position, index, vertex_count });
    }

    Ok(())
}

fn read_vertex(chunk: &[u8]) -> Vertex {
    let mut f = [0.0f32; FLOATS_PER_VERTEX];
    for (dst, src) in f.iter_mut().zip(chunk.chunks_exact(4)) {
        *dst = f32::from_le_bytes([src[0], src[1], src[2], src[3]]);
    }
    Vertex::new([f[0], f[1], f[2]], [f[3], f[4], f[5], f[6]])
}

struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    fn read_count(&mut self, section: &'static str) -> Result<usize, MeshError> {
        let raw = self.take(section, 1, COUNT_SIZE)?;
        Ok(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize)
    }

    fn take(&mut self, section: &'static str, count: usize, size: usize) -> Result<&'a [u8], MeshError> {
        let available = self.remaining();
        let needed = count.saturating_mul(size);

        if needed > available {
            return Err(MeshError::Truncated { section, offset: self.offset, needed, available });
        }

        let slice = &self.bytes[self.offset..self.offset + needed];
        self.offset += needed;
        Ok(slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Vec<Vertex>, Vec<u16>) {
        let red = [1.0, 0.0, 0.0, 1.0];
        (
            vec![
                Vertex::new([0.0, 1.0, 0.0], red),
                Vertex::new([1.0, -1.0, 0.0], red),
                Vertex::new([-1.0, -1.0, 0.0], red),
            ],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn encoded_size_matches_layout() {
        let (v, i) = triangle();
        let bytes = encode(&v, &i);
        assert_eq!(bytes.len(), 4 + 3 * 28 + 4 + 3 * 2);
        assert_eq!(&bytes[..4], &3u32.to_le_bytes());
    }

    #[test]
    fn decode_reads_encoded_triangle() {
        let (v, i) = triangle();
        let (dv, di) = decode(&encode(&v, &i)).unwrap();
        assert_eq!(dv, v);
        assert_eq!(di, i);
    }

    #[test]
    fn decode_reads_little_endian_floats() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1u32.to_le_bytes());
        for f in [1.5f32, -2.0, 3.25, 0.1, 0.2, 0.3, 1.0] {
            bytes.extend_from_slice(&f.to_le_bytes());
        }
        bytes.extend_from_slice(&0u32.to_le_bytes());

        let (v, i) = decode(&bytes).unwrap();
        assert_eq!(v[0].position, [1.5, -2.0, 3.25]);
        assert_eq!(v[0].color, [0.1, 0.2, 0.3, 1.0]);
        assert!(i.is_empty());
    }

    #[test]
    fn empty_blob_is_truncated() {
        let err = decode(&[]).unwrap_err();
        assert!(matches!(err, MeshError::Truncated { section: "vertex count", .. }));
    }

    #[test]
    fn vertex_data_shorter_than_declared() {
        let (v, i) = triangle();
        let mut bytes = encode(&v, &i);
        bytes[..4].copy_from_slice(&10u32.to_le_bytes());

        let err = decode(&bytes).unwrap_err();
        match err {
            MeshError::Truncated { section, offset, needed, .. } => {
                assert_eq!(section, "vertex data");
                assert_eq!(offset, 4);
                assert_eq!(needed, 280);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn index_data_cut_short() {
        let (v, i) = triangle();
        let bytes = encode(&v, &i);
        let err = decode(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(err, MeshError::Truncated { section: "index data", .. }));
    }

    #[test]
    fn huge_declared_count_does_not_overflow() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0u32.to_le_bytes());
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, MeshError::Truncated { .. }));
    }

    #[test]
    fn vertex_count_above_index_range() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(MAX_VERTICES as u32 + 1).to_le_bytes());
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, MeshError::TooManyVertices { count, .. } if count == MAX_VERTICES + 1));
        assert_eq!(
            err.to_string(),
            "mesh has 65536 vertices; the format allows at most 65535 vertices"
        );
    }

    #[test]
    fn index_past_vertex_count() {
        let (v, _) = triangle();
        let err = decode(&encode(&v, &[0, 1, 3])).unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange { position: 2, index: 3, vertex_count: 3 }
        ));
    }

    #[test]
    fn dangling_indices() {
        let (v, _) = triangle();
        let err = decode(&encode(&v, &[0, 1, 2, 0])).unwrap_err();
        assert!(matches!(err, MeshError::PartialTriangle { count: 4 }));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let (v, i) = triangle();
        let mut bytes = encode(&v, &i);
        bytes.extend_from_slice(&[0xAB; 5]);
        assert!(decode(&bytes).is_ok());
    }
}
