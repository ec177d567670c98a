//! Construction of a tunneled index from a plain text.
//!
//! The pipeline runs entirely in memory: suffix array and Burrows-Wheeler
//! transform (provided by the `bio` crate), wavelet matrix, de Bruijn
//! reduction, prefix-interval marking, and finally a single compaction pass
//! that drops every row sitting inside a tunnel's entry columns.

use crate::converter::Converter;
use crate::dbg;
use crate::tfm_index::TFMIndex;
use crate::util;

use bio::data_structures::bwt::bwt;
use bio::data_structures::suffix_array::suffix_array;
use log::debug;
use vers_vecs::WaveletMatrix;

/// Largest de Bruijn graph order considered by default.
const DEFAULT_MAX_ORDER: usize = 16;

impl<C> TFMIndex<u8, C>
where
    C: Converter<Char = u8>,
{
    /// Build a tunneled index over `text`.
    ///
    /// The text must end with a single 0 terminator that occurs nowhere
    /// else.
    pub fn from_text(text: &[u8], converter: C) -> Self {
        Self::from_text_with_max_order(text, converter, DEFAULT_MAX_ORDER)
    }

    /// Build a tunneled index over `text`, bounding the de Bruijn graph
    /// order search by `max_order`.
    pub fn from_text_with_max_order(text: &[u8], converter: C, max_order: usize) -> Self {
        assert!(!text.is_empty(), "cannot index an empty text");
        debug_assert_eq!(
            text.iter().rposition(|&c| c != 0),
            if text.len() == 1 {
                None
            } else {
                Some(text.len() - 2)
            },
            "the text must end with a single 0 terminator",
        );
        let n = text.len();

        let (wt, cs) = bwt_wavelet(text);

        let reduction = dbg::find_min_dbg(&wt, &cs, max_order);
        debug!(
            "reduced to an order-{} de Bruijn graph with {} nodes over {} rows",
            reduction.order,
            reduction.node_count,
            n,
        );

        let (dout, din) = dbg::mark_prefix_intervals(&wt, &cs, &reduction.intervals);
        let (l, dout, din) = compact(&wt, &dout, &din);
        debug!("tunneling kept {} of {} rows", l.len(), n);

        Self::assemble(n, l, dout, din, converter)
    }
}

/// Compute the wavelet matrix of the text's Burrows-Wheeler transform
/// together with the cumulative symbol counts.
pub(crate) fn bwt_wavelet(text: &[u8]) -> (WaveletMatrix, Vec<usize>) {
    let sa = suffix_array(text);
    let bw = bwt(text, &sa)
        .into_iter()
        .map(u64::from)
        .collect::<Vec<_>>();

    let max_sym = bw.iter().copied().max().unwrap_or(0);
    let mut cs = vec![0usize; max_sym as usize + 2];
    for &sym in &bw {
        cs[sym as usize + 1] += 1;
    }
    for i in 1..cs.len() {
        cs[i] += cs[i - 1];
    }

    let width = (util::log2(max_sym.max(1)) + 1) as u16;
    (WaveletMatrix::from_slice(&bw, width), cs)
}

/// Delete every row lying strictly inside a tunnel entry column.
///
/// One pass with two write cursors: rows with `din` set keep their symbol
/// and their `dout` bit; rows with `dout` set keep their `din` bit. Both
/// output vectors end in a sentinel one and have equal length, since marking
/// cleared the same number of bits on either side.
fn compact(wt: &WaveletMatrix, dout: &[bool], din: &[bool]) -> (Vec<u64>, Vec<bool>, Vec<bool>) {
    let n = wt.len();
    let mut l = Vec::with_capacity(n);
    let mut new_dout = Vec::with_capacity(n + 1);
    let mut new_din = Vec::with_capacity(n + 1);
    for i in 0..n {
        if din[i] {
            l.push(wt.get_u64_unchecked(i));
            new_dout.push(dout[i]);
        }
        if dout[i] {
            new_din.push(din[i]);
        }
    }
    new_dout.push(true);
    new_din.push(true);
    debug_assert_eq!(new_dout.len(), new_din.len());
    (l, new_dout, new_din)
}
