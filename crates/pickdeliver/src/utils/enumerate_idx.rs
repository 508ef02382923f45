use std::{iter::Enumerate, marker::PhantomData};

/// Iterator adapter yielding typed indices instead of raw `usize` positions.
pub struct TypedEnumerate<I, Idx> {
    inner: Enumerate<I>,
    _index: PhantomData<Idx>,
}

pub trait EnumerateIdx<Idx>: Iterator + Sized {
    fn enumerate_idx(self) -> TypedEnumerate<Self, Idx> {
        TypedEnumerate {
            inner: self.enumerate(),
            _index: PhantomData,
        }
    }
}

impl<I: Iterator, Idx> EnumerateIdx<Idx> for I {}

impl<I: Iterator, Idx: From<usize>> Iterator for TypedEnumerate<I, Idx> {
    type Item = (Idx, I::Item);

    fn next(&mut self) -> Option<Self::Item> {
        let (position, item) = self.inner.next()?;
        Some((Idx::from(position), item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I: ExactSizeIterator, Idx: From<usize>> ExactSizeIterator for TypedEnumerate<I, Idx> {}
