/// `true` if the value at `position` is marked as null in `nulls`.
///
/// The bitmap holds one bit per row, least significant bit first. The service only transmits
/// bytes up to the last null it has to represent, so positions beyond the end of the bitmap are
/// not null.
pub fn is_null(nulls: &[u8], position: usize) -> bool {
    match nulls.get(position / 8) {
        Some(byte) => byte & (1 << (position % 8)) != 0,
        None => false,
    }
}
