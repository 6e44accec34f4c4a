//! Iterator adapters over the dense `(key, value)` entries of the maps.

use std::iter::FusedIterator;

/// Iterator over `(key, &value)` pairs, in dense order.
#[derive(Clone)]
pub struct Iter<I> {
    inner: I,
}

impl<I> Iter<I> {
    pub(crate) fn new(inner: I) -> Iter<I> {
        Iter { inner }
    }
}

impl<'a, K, V, I> Iterator for Iter<I>
where
    K: Copy + 'a,
    V: 'a,
    I: Iterator<Item = &'a (K, V)>,
{
    type Item = (K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<(K, &'a V)> {
        self.inner.next().map(|(k, v)| (*k, v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<(K, &'a V)> {
        self.inner.nth(n).map(|(k, v)| (*k, v))
    }
}

impl<'a, K, V, I> DoubleEndedIterator for Iter<I>
where
    K: Copy + 'a,
    V: 'a,
    I: DoubleEndedIterator<Item = &'a (K, V)>,
{
    #[inline]
    fn next_back(&mut self) -> Option<(K, &'a V)> {
        self.inner.next_back().map(|(k, v)| (*k, v))
    }
}

impl<'a, K, V, I> ExactSizeIterator for Iter<I>
where
    K: Copy + 'a,
    V: 'a,
    I: ExactSizeIterator<Item = &'a (K, V)>,
{
}

impl<'a, K, V, I> FusedIterator for Iter<I>
where
    K: Copy + 'a,
    V: 'a,
    I: FusedIterator<Item = &'a (K, V)>,
{
}

/// Iterator over `(key, &mut value)` pairs, in dense order.
///
/// Keys are handed out by value so they cannot be changed behind the sparse index.
pub struct IterMut<I> {
    inner: I,
}

impl<I> IterMut<I> {
    pub(crate) fn new(inner: I) -> IterMut<I> {
        IterMut { inner }
    }
}

impl<'a, K, V, I> Iterator for IterMut<I>
where
    K: Copy + 'a,
    V: 'a,
    I: Iterator<Item = &'a mut (K, V)>,
{
    type Item = (K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<(K, &'a mut V)> {
        self.inner.next().map(|(k, v)| (*k, v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V, I> DoubleEndedIterator for IterMut<I>
where
    K: Copy + 'a,
    V: 'a,
    I: DoubleEndedIterator<Item = &'a mut (K, V)>,
{
    #[inline]
    fn next_back(&mut self) -> Option<(K, &'a mut V)> {
        self.inner.next_back().map(|(k, v)| (*k, v))
    }
}

impl<'a, K, V, I> ExactSizeIterator for IterMut<I>
where
    K: Copy + 'a,
    V: 'a,
    I: ExactSizeIterator<Item = &'a mut (K, V)>,
{
}

impl<'a, K, V, I> FusedIterator for IterMut<I>
where
    K: Copy + 'a,
    V: 'a,
    I: FusedIterator<Item = &'a mut (K, V)>,
{
}
