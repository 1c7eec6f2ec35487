// Ingestion caps applied when loading untrusted documents

// Document size caps
pub const MAX_NODES: usize = 200_000;
pub const MAX_EDGES: usize = 300_000;

// Highest id the allocator hands out or a document may carry; keeps
// `next_id` from overflowing and ids exact as JS numbers.
pub const MAX_NODE_ID: u32 = i32::MAX as u32;

// Titles and labels, in bytes
pub const MAX_TEXT_LEN: usize = 4 * 1024;

#[inline]
pub fn in_coord_bounds(x: f64) -> bool { x.is_finite() }

#[inline]
pub fn in_text_bounds(s: &str) -> bool { s.len() <= MAX_TEXT_LEN }
