use crate::{
    CompressedSet, Error, Ksuid, LockRandom, MalformedReason, Sequence, append_compressed,
};
use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};
use test_case::test_case;

fn id(timestamp: u32, payload: u128) -> Ksuid {
    Ksuid::from_components(timestamp, payload.to_be_bytes())
}

fn sorted_unique(ids: &[Ksuid]) -> Vec<Ksuid> {
    let mut expected = ids.to_vec();
    expected.sort();
    expected.dedup();
    expected
}

fn malformed(offset: usize, reason: MalformedReason) -> Error {
    Error::MalformedSet { offset, reason }
}

#[test]
fn empty_input_encodes_to_nothing() {
    let set = CompressedSet::compress(&[]);
    assert!(set.is_empty());
    assert_eq!(set.iter().next(), None);
    assert_eq!(set.collect_ids(), Ok(vec![]));
}

#[test]
fn single_id_is_one_raw_record() {
    let a = id(1, 42);
    let set = CompressedSet::compress(&[a]);
    assert_eq!(set.len(), 21);
    assert_eq!(set.as_bytes()[0], 0x00);
    assert_eq!(&set.as_bytes()[1..], a.as_bytes());
    assert_eq!(set.collect_ids(), Ok(vec![a]));
}

#[test]
fn two_consecutive_payloads_use_a_delta() {
    let ids = [id(7, 10), id(7, 11)];
    let set = CompressedSet::compress(&ids);
    assert_eq!(set.len(), 23);
    assert_eq!(&set.as_bytes()[21..], &[0x81, 0x01]);
    assert_eq!(set.collect_ids().unwrap(), ids);
}

#[test]
fn three_consecutive_payloads_use_a_range() {
    let ids = [id(7, 10), id(7, 11), id(7, 12)];
    let set = CompressedSet::compress(&ids);
    assert_eq!(set.len(), 23);
    assert_eq!(&set.as_bytes()[21..], &[0xC1, 0x01]);
    assert_eq!(set.collect_ids().unwrap(), ids);
}

#[test]
fn sequence_compresses_to_a_raw_and_a_range() {
    let seed = Ksuid::from_timestamp_and_rand(1000, &LockRandom::new(StdRng::seed_from_u64(1)));
    let ids: Vec<Ksuid> = Sequence::new(seed).take(1000).collect();
    let set = CompressedSet::compress(&ids);

    assert_eq!(set.len(), 24);
    assert_eq!(&set.as_bytes()[21..], &[0xC2, 0x03, 0xE6]);
    assert_eq!(set.collect_ids().unwrap(), ids);
}

#[test]
fn full_sequence_stays_small() {
    let ids: Vec<Ksuid> = Sequence::new(Ksuid::new()).collect();
    assert_eq!(ids.len(), 65536);
    let set = CompressedSet::compress(&ids);
    assert_eq!(set.len(), 24);
    assert_eq!(set.collect_ids().unwrap(), ids);
}

#[test]
fn mixed_records_have_exact_layout() {
    let p = u128::from_be_bytes([0xAB; 16]);
    let ids = [id(100, 1), id(100, 5), id(300, p), id(300, p + 1), id(300, p + 2)];
    let set = CompressedSet::compress(&ids);

    let mut expected = vec![0x00, 0, 0, 0, 100];
    expected.extend_from_slice(&1u128.to_be_bytes());
    expected.extend_from_slice(&[0x81, 0x04]);
    expected.extend_from_slice(&[0x41, 0xC8]);
    expected.extend_from_slice(&[0xAB; 16]);
    expected.extend_from_slice(&[0xC1, 0x01]);

    assert_eq!(set.as_bytes(), expected.as_slice());
    assert_eq!(set.collect_ids().unwrap(), ids);
}

#[test]
fn duplicates_are_stored_once() {
    let (a, b) = (id(5, 1), id(5, 9));
    let set = CompressedSet::compress(&[a, a, b, b, b]);
    assert_eq!(set, CompressedSet::compress(&[a, b]));
    assert_eq!(set.collect_ids().unwrap(), vec![a, b]);
}

#[test]
fn duplicates_inside_a_run_are_skipped() {
    let ids = [id(5, 1), id(5, 2), id(5, 2), id(5, 3), id(5, 3), id(5, 4)];
    let set = CompressedSet::compress(&ids);
    assert_eq!(set.len(), 23);
    assert_eq!(set.collect_ids().unwrap(), sorted_unique(&ids));
}

#[test]
fn unsorted_input_is_sorted_first() {
    let ids = [id(9, 3), id(2, 8), id(9, 1), id(2, 7)];
    let set = CompressedSet::compress(&ids);
    assert_eq!(set.collect_ids().unwrap(), sorted_unique(&ids));
}

#[test]
fn extremes_round_trip() {
    let ids = [Ksuid::NIL, Ksuid::MAX];
    let set = CompressedSet::compress(&ids);
    assert_eq!(set.collect_ids().unwrap(), ids);
}

#[test_case(0 ; "empty")]
#[test_case(1 ; "one")]
#[test_case(2 ; "two")]
#[test_case(1000 ; "thousand")]
fn random_ids_round_trip(n: usize) {
    let rng = LockRandom::new(StdRng::seed_from_u64(n as u64));
    let ids: Vec<Ksuid> = (0..n)
        .map(|i| Ksuid::from_timestamp_and_rand(1_000 + (i as u32 % 7), &rng))
        .collect();
    let set = CompressedSet::compress(&ids);
    assert_eq!(set.collect_ids().unwrap(), sorted_unique(&ids));
}

#[test]
fn append_adds_a_second_fragment() {
    let first = [id(50, 1), id(50, 2)];
    let second = [id(10, 9), id(60, 3)];

    let set = CompressedSet::compress(&first).append(&second);
    let mut expected = first.to_vec();
    expected.extend_from_slice(&second);
    assert_eq!(set.collect_ids().unwrap(), expected);

    let same = append_compressed(CompressedSet::compress(&first).into_bytes(), &second);
    assert_eq!(same, set);
}

#[test]
fn byte_concatenation_decodes_in_order() {
    let a = CompressedSet::compress(&[id(3, 3), id(3, 4), id(3, 5)]);
    let b = CompressedSet::compress(&[id(1, 1)]);

    let mut bytes = a.clone().into_bytes();
    bytes.extend_from_slice(b.as_bytes());
    let joined = CompressedSet::from_bytes(bytes);

    assert_eq!(
        joined.collect_ids().unwrap(),
        vec![id(3, 3), id(3, 4), id(3, 5), id(1, 1)]
    );
}

#[test]
fn appending_nothing_leaves_set_unchanged() {
    let set = CompressedSet::compress(&[id(1, 1)]);
    assert_eq!(set.clone().append(&[]), set);
}

#[test]
fn from_iterator_compresses() {
    let set: CompressedSet = [id(4, 2), id(4, 1)].into_iter().collect();
    assert_eq!(set.collect_ids().unwrap(), vec![id(4, 1), id(4, 2)]);
}

#[test]
fn display_lists_ids() {
    let set = CompressedSet::compress(&[Ksuid::NIL, Ksuid::MAX]);
    assert_eq!(
        set.to_string(),
        "[\"000000000000000000000000000\", \"aWgEPTl1tmebfsQzFP4bxwgy80V\"]"
    );
    assert_eq!(CompressedSet::default().to_string(), "[]");
}

fn raw(id: Ksuid) -> Vec<u8> {
    let mut bytes = vec![0x00];
    bytes.extend_from_slice(id.as_bytes());
    bytes
}

#[test]
fn truncated_raw_record_is_reported() {
    let set = CompressedSet::from_bytes(vec![0x00, 1, 2, 3]);
    let mut iter = set.iter();
    assert_eq!(
        iter.next(),
        Some(Err(malformed(0, MalformedReason::Truncated { need: 20, have: 3 })))
    );
    assert_eq!(iter.next(), None);
}

#[test]
fn delta_before_raw_is_reported() {
    let set = CompressedSet::from_bytes(vec![0x81, 0x01]);
    assert_eq!(
        set.collect_ids(),
        Err(malformed(0, MalformedReason::MissingBase))
    );
}

#[test]
fn iterator_fuses_after_an_error() {
    let a = id(1, 1);
    let mut bytes = raw(a);
    bytes.push(0x40);
    bytes.extend_from_slice(&[0x81, 0x01]);

    let set = CompressedSet::from_bytes(bytes);
    let mut iter = set.iter();
    assert_eq!(iter.next(), Some(Ok(a)));
    assert_eq!(
        iter.next(),
        Some(Err(malformed(21, MalformedReason::InvalidTag(0x40))))
    );
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test_case(&[0x40], MalformedReason::InvalidTag(0x40) ; "invalid tag")]
#[test_case(&[0x83, 0x01], MalformedReason::Truncated { need: 3, have: 1 } ; "truncated")]
fn offset_stays_on_the_failed_record(tail: &[u8], reason: MalformedReason) {
    let base = id(5, u128::MAX);
    let mut bytes = raw(base);
    bytes.extend_from_slice(tail);
    let set = CompressedSet::from_bytes(bytes);
    let mut iter = set.iter();
    assert_eq!(iter.next(), Some(Ok(base)));
    assert_eq!(iter.offset(), 21);
    assert_eq!(iter.next(), Some(Err(malformed(21, reason))));
    assert_eq!(iter.offset(), 21);
}

#[test]
fn offset_stays_on_a_record_without_base() {
    let set = CompressedSet::from_bytes(vec![0x81, 0x01]);
    let mut iter = set.iter();
    assert_eq!(
        iter.next(),
        Some(Err(malformed(0, MalformedReason::MissingBase)))
    );
    assert_eq!(iter.offset(), 0);
}

#[test]
fn offset_stays_on_an_overflowing_record() {
    let base = id(5, u128::MAX);
    let mut bytes = raw(base);
    bytes.extend_from_slice(&[0x81, 0x01]);
    let set = CompressedSet::from_bytes(bytes);
    let mut iter = set.iter();
    iter.next();
    assert_eq!(
        iter.next(),
        Some(Err(malformed(21, MalformedReason::Overflow)))
    );
    assert_eq!(iter.offset(), 21);
}

#[test_case(id(5, u128::MAX), &[0x81, 0x01] ; "payload delta")]
#[test_case(id(5, u128::MAX - 1), &[0xC1, 0x01] ; "payload range")]
#[test_case(id(u32::MAX, 0), &[0x41, 0x01, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0] ; "time delta")]
fn overflowing_records_are_reported(base: Ksuid, tail: &[u8]) {
    let mut bytes = raw(base);
    bytes.extend_from_slice(tail);
    let set = CompressedSet::from_bytes(bytes);
    let mut iter = set.iter();
    assert_eq!(iter.next(), Some(Ok(base)));
    assert_eq!(
        iter.next(),
        Some(Err(malformed(21, MalformedReason::Overflow)))
    );
    assert_eq!(iter.next(), None);
}

#[test]
fn range_ending_at_max_payload_is_valid() {
    let mut bytes = raw(id(5, u128::MAX - 2));
    bytes.extend_from_slice(&[0xC1, 0x01]);
    let set = CompressedSet::from_bytes(bytes);
    assert_eq!(
        set.collect_ids().unwrap(),
        vec![id(5, u128::MAX - 2), id(5, u128::MAX - 1), id(5, u128::MAX)]
    );
}

#[test]
fn size_hint_tracks_pending_range() {
    let set = CompressedSet::compress(&[id(1, 1), id(1, 2), id(1, 3), id(1, 4)]);
    let mut iter = set.iter();
    iter.next();
    iter.next();
    assert_eq!(iter.size_hint(), (2, Some(2)));
    assert_eq!(iter.count(), 2);
}

fn clustered_ids() -> impl Strategy<Value = Vec<Ksuid>> {
    prop::collection::vec((0u32..4, 0u128..48), 0..200)
        .prop_map(|v| v.into_iter().map(|(t, p)| id(1_000 + t, p)).collect())
}

proptest! {
    #[test]
    fn clustered_ids_round_trip(ids in clustered_ids()) {
        let set = CompressedSet::compress(&ids);
        prop_assert_eq!(set.collect_ids().unwrap(), sorted_unique(&ids));
    }

    #[test]
    fn arbitrary_ids_round_trip(raw in prop::collection::vec(any::<[u8; 20]>(), 0..64)) {
        let ids: Vec<Ksuid> = raw.into_iter().map(Ksuid::from_array).collect();
        let set = CompressedSet::compress(&ids);
        prop_assert_eq!(set.collect_ids().unwrap(), sorted_unique(&ids));
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..128)) {
        let set = CompressedSet::from_bytes(bytes);
        let items: Vec<_> = set.iter().take(10_000).collect();
        let errors = items.iter().filter(|r| r.is_err()).count();
        prop_assert!(errors <= 1);
        if errors == 1 {
            prop_assert!(items.last().is_some_and(Result::is_err));
        }
    }
}
