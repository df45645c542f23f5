use num_bigint::BigUint;
use proptest::prelude::*;

use crate::amount::*;

proptest! {
    #[test]
    fn add_matches_checked_i64(
        lhs in any::<Amount<NegativeAllowed>>(),
        rhs in any::<Amount<NegativeAllowed>>())
    {
        let _init_guard = zen_test::init();

        match lhs.value().checked_add(rhs.value()) {
            Some(expected) => {
                prop_assert_eq!((lhs + rhs)?, expected);
            }
            None => {
                let overflowed = matches!(lhs + rhs, Err(Error::AdditionOverflow { .. }));
                prop_assert!(overflowed, "addition must overflow");
            }
        }
    }

    #[test]
    fn public_amount_round_trip(amount in any::<PublicAmount>()) {
        let _init_guard = zen_test::init();

        let parsed: PublicAmount = amount.to_string().parse()?;
        prop_assert_eq!(&parsed, &amount);

        let reparsed: PublicAmount = parsed.to_string().parse()?;
        prop_assert_eq!(reparsed, parsed);
    }

    #[test]
    fn public_amount_with_more_than_256_bits_is_too_large(
        bytes in any::<[u8; 32]>(),
        extra_bits in 1usize..64,
    ) {
        let _init_guard = zen_test::init();

        let value = (BigUint::from_bytes_be(&bytes) | (BigUint::from(1u8) << 255usize)) << extra_bits;
        let amount = PublicAmount::from(value);

        prop_assert!(
            matches!(amount.check_range(), Err(PublicAmountError::TooLarge { .. })),
            "expected TooLarge"
        );
    }

    #[test]
    fn negative_public_amount_is_rejected(magnitude in 1u64..) {
        let _init_guard = zen_test::init();

        let amount: PublicAmount = format!("-{magnitude}").parse()?;
        prop_assert!(
            matches!(amount.check_range(), Err(PublicAmountError::Negative { .. })),
            "expected Negative"
        );
    }

    #[test]
    fn exact_multiples_divide_exactly(
        quotient in 0i64..=i64::MAX,
        factor in 1u64..,
    ) {
        let _init_guard = zen_test::init();

        let amount = PublicAmount::from(BigUint::from(quotient as u64) * factor);
        prop_assert_eq!(amount.div_exact(&BigUint::from(factor))?, quotient);
    }

    #[test]
    fn non_multiples_are_rejected(
        quotient in 0u64..=(i64::MAX as u64),
        factor in 2u64..,
        offset in 1u64..,
    ) {
        let _init_guard = zen_test::init();

        let remainder = offset % factor;
        prop_assume!(remainder != 0);

        let amount = PublicAmount::from(BigUint::from(quotient) * factor + remainder);
        prop_assert!(
            matches!(amount.div_exact(&BigUint::from(factor)), Err(PublicAmountError::Remainder { .. })),
            "expected Remainder"
        );
    }
}
