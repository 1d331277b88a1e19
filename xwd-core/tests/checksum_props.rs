use proptest::prelude::*;
use xwd_core::checksum::{Cksum, checksum, checksum_chain};

proptest! {
    #[test]
    fn chaining_equals_concatenation(
        seed in any::<u16>(),
        a in proptest::collection::vec(any::<u8>(), 0..256),
        b in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        let joined = [a.as_slice(), b.as_slice()].concat();
        prop_assert_eq!(checksum(checksum(seed, &a), &b), checksum(seed, &joined));
    }

    #[test]
    fn chain_helper_matches_manual_seeding(
        parts in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..64), 0..6),
    ) {
        let mut manual = 0u16;
        for part in &parts {
            manual = checksum(manual, part);
        }
        let chained = checksum_chain(0, parts.iter().map(Vec::as_slice));
        prop_assert_eq!(chained, manual);
    }

    #[test]
    fn repeated_computation_is_stable(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        prop_assert_eq!(Cksum::compute(&data), Cksum::compute(&data));
    }
}
