//! Value vs reference passing for fixed-size byte arrays
//!
//! Every function here is `#[inline(never)]` so the copy (or the lack of one)
//! survives optimisation and shows up in the benchmark.

/// The sizes the `memory` bench runs at
pub const SIZES: &[usize] = &[10, 100, 1000, 100_000, 1_000_000];

#[derive(Clone, Copy)]
pub struct Blob<const N: usize> {
    pub data: [u8; N],
}

impl<const N: usize> Blob<N> {
    pub const MIDDLE: usize = N / 2;

    pub const fn new() -> Self {
        Self { data: [0; N] }
    }
}

impl<const N: usize> Default for Blob<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[inline(never)]
pub fn read_middle_by_value<const N: usize>(blob: Blob<N>) -> u8 {
    blob.data[Blob::<N>::MIDDLE]
}

#[inline(never)]
pub fn read_middle_by_ref<const N: usize>(blob: &Blob<N>) -> u8 {
    blob.data[Blob::<N>::MIDDLE]
}

#[inline(never)]
pub fn make_value<const N: usize>() -> Blob<N> {
    Blob::new()
}

/// Heap-allocated counterpart of [`make_value`]
#[inline(never)]
pub fn make_boxed<const N: usize>() -> Box<Blob<N>> {
    Box::new(Blob::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_index() {
        assert_eq!(Blob::<10>::MIDDLE, 5);
        assert_eq!(Blob::<1000>::MIDDLE, 500);
        assert_eq!(Blob::<100_000>::MIDDLE, 50_000);
    }

    #[test]
    fn value_and_ref_read_the_same_byte() {
        let mut blob = Blob::<100>::new();
        blob.data[50] = 0xAB;
        assert_eq!(read_middle_by_value(blob), 0xAB);
        assert_eq!(read_middle_by_ref(&blob), 0xAB);
    }

    #[test]
    fn constructors_are_zeroed() {
        assert!(make_value::<1000>().data.iter().all(|&b| b == 0));
        assert!(make_boxed::<100_000>().data.iter().all(|&b| b == 0));
    }

    #[test]
    fn sizes_are_ascending() {
        assert!(SIZES.windows(2).all(|w| w[0] < w[1]));
    }
}
