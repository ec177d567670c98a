mod testutil;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tfm_index::converter::IdConverter;
use tfm_index::TFMIndex;

fn round_trip(text: &[u8]) -> TFMIndex<u8, IdConverter<u8>> {
    let tfm = TFMIndex::from_text(text, IdConverter::<u8>::default());
    assert_eq!(tfm.len(), text.len());
    assert_eq!(tfm.invert(), text.to_vec(), "text = {:?}", text);
    tfm
}

#[test]
fn test_round_trip_banana() {
    round_trip(b"banana\0");
}

#[test]
fn test_round_trip_mississippi() {
    // Two width-2 tunnels (the si- and ss-intervals of the order-2 graph)
    // drop two rows.
    let tfm = round_trip(b"mississippi\0");
    assert_eq!(tfm.tunneled_len(), 10);
}

#[test]
fn test_round_trip_single_symbol_run() {
    // A period-1 repeat offers no collapsible interval, so the index
    // degrades to a plain FM-index of the run.
    let tfm = round_trip(b"aaaaaaaa\0");
    assert!(tfm.tunneled_len() <= tfm.len());
}

#[test]
fn test_round_trip_periodic() {
    let tfm = round_trip(b"abcabcabcabc\0");
    assert!(tfm.tunneled_len() < tfm.len());
}

#[test]
fn test_round_trip_terminator_only() {
    let tfm = round_trip(b"\0");
    assert_eq!(tfm.len(), 1);
    assert_eq!(tfm.tunneled_len(), 1);
}

#[test]
fn test_save_load_behavioral_equivalence() {
    let dir = tempfile::tempdir().unwrap();
    let text = b"mississippi\0";
    let tfm = round_trip(text);

    let path = dir.path().join("index.tfm");
    let written = tfm.save(&path).unwrap();
    assert!(written > 0);
    assert_eq!(written, std::fs::metadata(&path).unwrap().len());

    let loaded = TFMIndex::<u8, IdConverter<u8>>::load(&path).unwrap();
    assert_eq!(loaded.len(), tfm.len());
    assert_eq!(loaded.tunneled_len(), tfm.tunneled_len());
    assert_eq!(loaded.invert(), tfm.invert());
}

#[test]
fn test_construction_is_deterministic() {
    let text = b"abcabcabcabc\0";
    let a = TFMIndex::from_text(text, IdConverter::<u8>::default());
    let b = TFMIndex::from_text(text, IdConverter::<u8>::default());
    assert_eq!(
        bincode::serialize(&a).unwrap(),
        bincode::serialize(&b).unwrap()
    );
}

#[test]
fn test_side_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let text = b"abcabcabcabc\0";
    let tfm = round_trip(text);

    let base = dir.path().join("text.raw");
    tfm.save_pfwg(&base).unwrap();
    let loaded = TFMIndex::load_pfwg(&base, IdConverter::<u8>::default()).unwrap();
    assert_eq!(loaded.len(), text.len());
    assert_eq!(loaded.tunneled_len(), tfm.tunneled_len());
    assert_eq!(loaded.invert(), text.to_vec());
}

#[test]
fn test_random_texts_round_trip() {
    let mut rng = StdRng::seed_from_u64(0);

    for &text_size in &[10usize, 100, 1000] {
        for alphabet_size in [2u8, 3, 8] {
            for _ in 0..20 {
                let text =
                    testutil::build_text(|| rng.gen::<u8>() % alphabet_size + 1, text_size);
                let tfm = TFMIndex::from_text(&text, IdConverter::<u8>::default());
                assert_eq!(tfm.invert(), text, "text = {:?}", text);
            }
        }
    }
}

#[test]
fn test_random_large_text_round_trip() {
    let mut rng = StdRng::seed_from_u64(7);
    let text = testutil::build_text(|| rng.gen::<u8>() % 4 + 1, 10_000);
    let tfm = TFMIndex::from_text(&text, IdConverter::<u8>::default());
    assert_eq!(tfm.invert(), text);
}

#[test]
fn test_random_texts_serialize_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    for i in 0..10 {
        let text = testutil::build_text(|| rng.gen::<u8>() % 4 + 1, 200);
        let tfm = TFMIndex::from_text(&text, IdConverter::<u8>::default());
        let path = dir.path().join(format!("index-{}.tfm", i));
        tfm.save(&path).unwrap();
        let loaded = TFMIndex::<u8, IdConverter<u8>>::load(&path).unwrap();
        assert_eq!(loaded.invert(), text, "text = {:?}", text);
    }
}

#[test]
fn test_repetitive_text_compresses() {
    // Eight copies of a phrase over a small alphabet; the tunneled column
    // must stay well below the text length.
    let mut text = Vec::new();
    for _ in 0..8 {
        text.extend_from_slice(b"acgtgtca");
    }
    text.push(0);
    let tfm = TFMIndex::from_text(&text, IdConverter::<u8>::default());
    assert!(tfm.tunneled_len() < text.len());
    assert_eq!(tfm.invert(), text);
}
