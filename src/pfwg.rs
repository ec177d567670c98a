//! Ingestion and export of pre-built `.L`/`.din`/`.dout` side files, the
//! interchange format of the external prefix-free-parsing generator.
//!
//! `.L` holds the remnant last column as raw bytes. `.din` and `.dout` are
//! packed bitvectors of exactly |L|+1 bits, most significant bit first
//! within each byte; trailing bits of the last byte are undefined.

use crate::converter::Converter;
use crate::error::Error;
use crate::tfm_index::TFMIndex;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use vers_vecs::RsVec;

impl<C> TFMIndex<u8, C>
where
    C: Converter<Char = u8>,
{
    /// Load a tunneled index from `base.L`, `base.din` and `base.dout`.
    ///
    /// The cumulative count vector is recomputed from the loaded column and
    /// sized by its actual largest symbol. The text length is recovered by
    /// walking the index once, up to the terminator.
    pub fn load_pfwg<P: AsRef<Path>>(base: P, converter: C) -> Result<Self, Error> {
        let base = base.as_ref();
        let l = fs::read(side_file(base, "L"))?;
        let m = l.len();
        let dout = read_bitvector(&side_file(base, "dout"), m)?;
        let din = read_bitvector(&side_file(base, "din"), m)?;

        let dout_ones = dout.iter().filter(|&&b| b).count();
        let din_ones = din.iter().filter(|&&b| b).count();
        if dout_ones != din_ones {
            return Err(Error::BlockCountMismatch {
                dout: dout_ones,
                din: din_ones,
            });
        }

        let l = l.into_iter().map(u64::from).collect();
        let mut index = Self::assemble(0, l, dout, din, converter);
        index.text_len = index.recovered_text_len();
        Ok(index)
    }

    /// Write the index's side files next to `base`, in the format
    /// [`load_pfwg`](Self::load_pfwg) reads.
    pub fn save_pfwg<P: AsRef<Path>>(&self, base: P) -> Result<(), Error> {
        let base = base.as_ref();
        let m = self.tunneled_len();
        let mut l = Vec::with_capacity(m);
        for i in 0..m {
            l.push(self.l.get_u64_unchecked(i) as u8);
        }
        fs::write(side_file(base, "L"), &l)?;
        fs::write(side_file(base, "dout"), pack_msb(&self.dout))?;
        fs::write(side_file(base, "din"), pack_msb(&self.din))?;
        Ok(())
    }

    /// Number of backward steps until the terminator is emitted, which is
    /// the length of the tunneled text.
    fn recovered_text_len(&self) -> usize {
        let mut pos = self.end();
        let mut len = 0;
        loop {
            let c = self.backward_step(&mut pos);
            len += 1;
            if self.converter.to_u64(c) == 0 {
                return len;
            }
        }
    }
}

fn side_file(base: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

fn read_bitvector(path: &Path, symbols: usize) -> Result<Vec<bool>, Error> {
    let bytes = fs::read(path)?;
    let bits = symbols + 1;
    if bytes.len() != (bits + 7) / 8 {
        return Err(Error::DimensionMismatch {
            symbols,
            bits: bytes.len() * 8,
        });
    }
    Ok((0..bits)
        .map(|i| bytes[i / 8] & (0x80 >> (i % 8)) != 0)
        .collect())
}

fn pack_msb(bits: &RsVec) -> Vec<u8> {
    let len = bits.len();
    let mut bytes = vec![0u8; (len + 7) / 8];
    for i in 0..len {
        if bits.get(i) == Some(1) {
            bytes[i / 8] |= 0x80 >> (i % 8);
        }
    }
    bytes
}
