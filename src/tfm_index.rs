use crate::converter::Converter;
use crate::error::Error;
use crate::heap_size::HeapSize;
use crate::util;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use vers_vecs::{BitVec, RsVec, WaveletMatrix};

/// A tunneled FM-index.
///
/// The index stores the remnant of a Burrows-Wheeler transformed text after
/// tunneling: rows that repeat an unbranched path of the text's de Bruijn
/// graph are collapsed, and two bitvectors `dout` and `din` record how many
/// parallel edges enter and leave each collapsed block. A backward step over
/// this structure still reproduces the original text exactly, so the index
/// is a self-index in less space than the plain transform.
///
/// All navigation state lives in caller-owned [`Position`] values; a built
/// index is immutable and can be shared freely between readers.
#[derive(Serialize, Deserialize, Debug)]
pub struct TFMIndex<T, C> {
    pub(crate) text_len: usize,
    pub(crate) l: WaveletMatrix,
    pub(crate) cs: Vec<usize>,
    pub(crate) dout: RsVec,
    pub(crate) din: RsVec,
    pub(crate) converter: C,
    pub(crate) _t: std::marker::PhantomData<T>,
}

/// A location inside the tunneled last column.
///
/// `i` is a row of the remnant column. `o` is the offset into the entry
/// column of the tunnel the walk is currently inside, deferred until the
/// tunnel's exit column is reached; it is zero outside of tunnels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub(crate) i: usize,
    pub(crate) o: usize,
}

impl Position {
    /// The row of the remnant last column this position points at.
    pub fn row(&self) -> usize {
        self.i
    }
}

impl<T, C> TFMIndex<T, C>
where
    T: Copy + Clone,
    C: Converter<Char = T>,
{
    /// Assemble an index from its raw parts. The caller guarantees that the
    /// parts describe a valid tunnel structure.
    pub(crate) fn assemble(
        text_len: usize,
        l: Vec<u64>,
        dout: Vec<bool>,
        din: Vec<bool>,
        converter: C,
    ) -> Self {
        debug_assert_eq!(dout.len(), l.len() + 1);
        debug_assert_eq!(din.len(), l.len() + 1);
        debug_assert!(dout[l.len()] && din[l.len()]);

        let max_sym = l.iter().copied().max().unwrap_or(0);
        let mut cs = vec![0usize; max_sym as usize + 2];
        for &sym in &l {
            cs[sym as usize + 1] += 1;
        }
        for i in 1..cs.len() {
            cs[i] += cs[i - 1];
        }

        let width = (util::log2(max_sym.max(1)) + 1) as u16;
        let l = WaveletMatrix::from_slice(&l, width);

        TFMIndex {
            text_len,
            l,
            cs,
            dout: RsVec::from_bit_vec(pack_bits(&dout)),
            din: RsVec::from_bit_vec(pack_bits(&din)),
            converter,
            _t: std::marker::PhantomData::<T>,
        }
    }

    /// The length of the indexed text, including its terminator.
    pub fn len(&self) -> usize {
        self.text_len
    }

    /// The length of the remnant last column. Strictly smaller than
    /// [`len`](Self::len) whenever tunneling collapsed anything.
    pub fn tunneled_len(&self) -> usize {
        self.l.len()
    }

    /// Number of collapsed blocks (ones in `dout`, equivalently in `din`).
    pub fn block_count(&self) -> usize {
        self.dout.rank1(self.dout.len())
    }

    /// The position of the text terminator's row, where every traversal
    /// starts.
    pub fn end(&self) -> Position {
        Position { i: 0, o: 0 }
    }

    /// The symbol preceding the text position `pos` stands for; the symbol
    /// the next [`backward_step`](Self::backward_step) will return.
    pub fn preceding_char(&self, pos: &Position) -> T {
        self.converter.from_u64(self.l.get_u64_unchecked(pos.i))
    }

    /// Move `pos` one text position backwards and return the symbol found
    /// there.
    ///
    /// The step is an LF-mapping over the remnant column, corrected for
    /// tunnels: entering a tunnel below its topmost row records the vertical
    /// offset, and the offset is consumed once the walk leaves through an
    /// exit column with multiple outgoing edges.
    pub fn backward_step(&self, pos: &mut Position) -> T {
        let sym = self.l.get_u64_unchecked(pos.i);
        let rank = self.l.rank_u64_unchecked(pos.i, sym);
        let mut i = self.cs[sym as usize] + rank;

        let block = self.din.rank1(i + 1);
        if self.din.get(i) == Some(0) {
            pos.o = i - self.din.select1(block - 1);
        }
        i = self.dout.select1(block - 1);
        if self.dout.get(i + 1) == Some(0) {
            i += pos.o;
            pos.o = 0;
        }

        pos.i = i;
        self.converter.from_u64(sym)
    }

    /// Reconstruct the original text, terminator included.
    pub fn invert(&self) -> Vec<T> {
        let mut text = Vec::with_capacity(self.text_len);
        let mut pos = self.end();
        for _ in 1..self.text_len {
            text.push(self.backward_step(&mut pos));
        }
        text.reverse();
        text.push(self.preceding_char(&pos));
        text
    }

    /// An endless iterator walking backwards through the text from `pos`,
    /// wrapping around at the terminator.
    pub fn iter_backward(&self, pos: Position) -> BackwardIterator<T, C> {
        BackwardIterator { index: self, pos }
    }
}

impl<T, C> TFMIndex<T, C>
where
    T: Copy + Clone,
    C: Converter<Char = T>,
    Self: Serialize + DeserializeOwned,
{
    /// Serialize the index to a file, returning the number of bytes written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<u64, Error> {
        let encoded = bincode::serialize(self)?;
        let mut file = File::create(path)?;
        file.write_all(&encoded)?;
        Ok(encoded.len() as u64)
    }

    /// Load an index previously stored with [`save`](Self::save).
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = BufReader::new(File::open(path)?);
        let index = bincode::deserialize_from(file)?;
        Ok(index)
    }
}

impl<T, C> HeapSize for TFMIndex<T, C> {
    fn heap_size(&self) -> usize {
        self.l.heap_size()
            + self.cs.capacity() * std::mem::size_of::<usize>()
            + self.dout.heap_size()
            + self.din.heap_size()
    }
}

/// An iterator that goes backwards through the text, producing one symbol
/// per step.
pub struct BackwardIterator<'a, T, C> {
    index: &'a TFMIndex<T, C>,
    pos: Position,
}

impl<T, C> Iterator for BackwardIterator<'_, T, C>
where
    T: Copy + Clone,
    C: Converter<Char = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.index.backward_step(&mut self.pos))
    }
}

pub(crate) fn pack_bits(bits: &[bool]) -> BitVec {
    let mut bv = BitVec::new();
    for &b in bits {
        bv.append(b);
    }
    bv
}
