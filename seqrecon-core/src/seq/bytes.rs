use memchr::memmem;

/// Anything that can be searched for as a run of bytes.
pub trait IntoNeedle<'a> {
    fn into_needle(self) -> &'a [u8];
}

impl<'a> IntoNeedle<'a> for &'a [u8] {
    #[inline]
    fn into_needle(self) -> &'a [u8] {
        self
    }
}

impl<'a> IntoNeedle<'a> for &'a str {
    #[inline]
    fn into_needle(self) -> &'a [u8] {
        self.as_bytes()
    }
}

impl<'a, const N: usize> IntoNeedle<'a> for &'a [u8; N] {
    #[inline]
    fn into_needle(self) -> &'a [u8] {
        self.as_slice()
    }
}

/// First occurrence of `needle` in `hay[start..end]`, as an index into `hay`.
pub fn find(hay: &[u8], needle: &[u8], start: usize, end: usize) -> Option<usize> {
    let len = hay.len();
    let start = start.min(len);
    let end = end.min(len);
    if start > end {
        return None;
    }
    if needle.is_empty() {
        return Some(start);
    }
    if needle.len() > end - start {
        return None;
    }
    memmem::find(&hay[start..end], needle).map(|i| start + i)
}
