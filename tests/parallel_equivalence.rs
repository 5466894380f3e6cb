#![cfg(feature = "parallel")]

use merkle_imprint::utils::set_parallelism;
use merkle_imprint::{Blake2sHasher, KeyedNoncer, Notary};

fn notary() -> Notary<Blake2sHasher, KeyedNoncer> {
    Notary::new(Blake2sHasher).with_noncer(KeyedNoncer::new([5u8; 32]))
}

#[test]
fn notarize_parallel_matches_sequential() {
    let values: Vec<Vec<u8>> = (0..37u8).map(|i| vec![i; 9]).collect();

    let baseline = {
        let _guard = set_parallelism(false);
        notary().notarize(&values).expect("sequential notarize")
    };
    let parallel = notary().notarize(&values).expect("parallel notarize");

    assert_eq!(baseline, parallel);
}

#[test]
fn imprint_agrees_across_schedules() {
    let values: Vec<Vec<u8>> = (0..21u8).map(|i| vec![i; 3]).collect();
    let recipe = notary().notarize(&values).expect("notarize");
    let evidence = notary().disclose(&recipe, &[0, 8, 20]).expect("disclose");

    let baseline = {
        let _guard = set_parallelism(false);
        notary().imprint(&evidence).expect("sequential imprint")
    };
    let parallel = notary().imprint(&evidence).expect("parallel imprint");

    assert_eq!(baseline, parallel);
    assert_eq!(&baseline, recipe.imprint().expect("root"));
}
