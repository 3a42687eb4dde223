//! Contract properties of participants and the two-phase transfer.

use fl_energy::devices::{Buffer, Conduit, Consumer, Device, DeviceContext, Generator, Participant};
use fl_energy::energy::{Energy, EnergyAmount, EnergyExt, transfer};
use proptest::prelude::*;

/// Any buffer state: capacity, held amount and per-call limits.
fn buffer() -> impl Strategy<Value = Buffer> {
    (0..1_000i64)
        .prop_flat_map(|capacity| (Just(capacity), 0..=capacity, 0..500i64, 0..500i64))
        .prop_map(|(capacity, energy, max_in, max_out)| {
            Buffer::with_rates(capacity, energy, max_in, max_out)
        })
}

/// A participant of any concrete kind, already ticked once so generators hold energy.
fn participant() -> impl Strategy<Value = Box<dyn Participant>> {
    prop_oneof![
        buffer().prop_map(|b| Box::new(b) as Box<dyn Participant>),
        (0..100i64, 0..300i64, any::<u64>()).prop_map(|(rate, capacity, seed)| {
            let mut g = Generator::new(rate, capacity, 0.3, seed);
            g.tick(&DeviceContext::new(0, 24));
            Box::new(g) as Box<dyn Participant>
        }),
        (0..300i64, 0..300i64).prop_map(|(capacity, fill)| {
            let mut c = Consumer::new(5.0, 0.0, 0.0, 0.0, capacity, 1);
            c.input_energy(fill, false);
            Box::new(c) as Box<dyn Participant>
        }),
        (0..100i64, 0..100i64, 0..100i64).prop_map(|(capacity, throughput, fill)| {
            let mut c = Conduit::new(capacity, throughput);
            c.input_energy(fill, false);
            Box::new(c) as Box<dyn Participant>
        }),
    ]
}

fn in_bounds(p: &dyn Participant) -> bool {
    (0..=p.energy_capacity()).contains(&p.energy())
}

proptest! {
    #[test]
    fn simulation_is_idempotent(mut p in participant(), amount in -50..2_000i64) {
        let before = p.energy();
        let first_in = p.input_energy(amount, true);
        let second_in = p.input_energy(amount, true);
        let first_out = p.output_energy(amount, true);
        let second_out = p.output_energy(amount, true);
        prop_assert_eq!(first_in, second_in);
        prop_assert_eq!(first_out, second_out);
        prop_assert_eq!(p.energy(), before);
    }

    #[test]
    fn commit_input_matches_simulation(mut p in participant(), amount in -50..2_000i64) {
        let before = p.energy();
        let simulated = p.input_energy(amount, true);
        let committed = p.input_energy(amount, false);
        prop_assert_eq!(simulated, committed);
        prop_assert!(committed >= 0);
        prop_assert_eq!(p.energy(), before + committed);
        prop_assert!(in_bounds(p.as_ref()));
    }

    #[test]
    fn commit_output_matches_simulation(mut p in participant(), amount in -50..2_000i64) {
        let before = p.energy();
        let simulated = p.output_energy(amount, true);
        let committed = p.output_energy(amount, false);
        prop_assert_eq!(simulated, committed);
        prop_assert!(committed >= 0 && committed <= before);
        prop_assert_eq!(p.energy(), before - committed);
        prop_assert!(in_bounds(p.as_ref()));
    }

    #[test]
    fn non_positive_requests_are_no_ops(mut p in participant(), amount in -1_000..=0i64) {
        let before = p.energy();
        prop_assert_eq!(p.input_energy(amount, false), 0);
        prop_assert_eq!(p.output_energy(amount, false), 0);
        prop_assert_eq!(p.energy(), before);
    }

    #[test]
    fn transfer_conserves_and_bounds(
        mut a in participant(),
        mut b in participant(),
        requested in -100..2_000i64,
    ) {
        let (a_before, b_before) = (a.energy(), b.energy());
        let moved = transfer(a.as_mut(), b.as_mut(), requested);

        prop_assert!(moved >= 0);
        prop_assert!(moved <= requested.max(0));
        prop_assert_eq!(a.energy(), a_before - moved);
        prop_assert_eq!(b.energy(), b_before + moved);
        prop_assert!(in_bounds(a.as_ref()) && in_bounds(b.as_ref()));
    }

    #[test]
    fn transfer_of_non_positive_amount_changes_nothing(
        mut a in participant(),
        mut b in participant(),
        requested in -1_000..=0i64,
    ) {
        let (a_before, b_before) = (a.energy(), b.energy());
        prop_assert_eq!(transfer(a.as_mut(), b.as_mut(), requested), 0);
        prop_assert_eq!(a.energy(), a_before);
        prop_assert_eq!(b.energy(), b_before);
    }

    #[test]
    fn predicates_agree_with_readers(p in participant()) {
        prop_assert_eq!(p.has_no_energy(), p.energy() == 0);
        prop_assert_eq!(p.has_full_energy(), p.energy() == p.energy_capacity());
    }
}

#[test]
fn full_source_into_empty_destination() {
    let mut source = Buffer::new(100, 100);
    let mut destination = Buffer::new(50, 0);
    assert_eq!(transfer(&mut source, &mut destination, 1000), 50);
    assert_eq!(source.energy(), 50);
    assert_eq!(destination.energy(), 50);
}

#[test]
fn nearly_empty_source_into_nearly_full_destination() {
    let mut source = Buffer::new(100, 10);
    let mut destination = Buffer::new(50, 40);
    assert_eq!(source.transfer_to(&mut destination, 100), 10);
    assert_eq!(source.energy(), 0);
    assert_eq!(destination.energy(), 50);
}

#[test]
fn empty_source_moves_nothing() {
    let mut source = Buffer::new(100, 0);
    let mut destination = Buffer::new(50, 20);
    assert_eq!(transfer(&mut source, &mut destination, 50), 0);
    assert_eq!(destination.energy(), 20);
}

#[test]
fn source_that_cannot_output_moves_nothing() {
    // Consumers never output, regardless of what they hold.
    let mut source = Consumer::new(1.0, 0.0, 0.0, 0.0, 100, 3);
    source.input_energy(80, false);
    let mut destination = Buffer::new(50, 0);
    assert_eq!(transfer(&mut source, &mut destination, 30), 0);
    assert_eq!(source.energy(), 80);
    assert_eq!(destination.energy(), 0);
}

#[test]
fn generator_cannot_be_a_destination() {
    let mut source = Buffer::new(100, 100);
    let mut generator = Generator::new(10, 100, 0.0, 1);
    assert_eq!(transfer(&mut source, &mut generator, 30), 0);
    assert_eq!(source.energy(), 100);
}

#[test]
fn conduit_throughput_caps_shared_links() {
    let mut a = Buffer::new(100, 100);
    let mut b = Buffer::new(100, 100);
    let mut wire = Conduit::new(100, 30);
    let mut sink = Buffer::new(1_000, 0);

    assert_eq!(transfer(&mut a, &mut wire, 20), 20);
    assert_eq!(transfer(&mut b, &mut wire, 20), 10);
    assert_eq!(transfer(&mut wire, &mut sink, 100), 30);
    assert_eq!(a.energy() + b.energy() + wire.energy() + sink.energy(), 200);
}

#[test]
fn heterogeneous_participants_transfer_through_trait_objects() {
    let mut chain: Vec<Box<dyn Participant>> = vec![
        Box::new(Buffer::new(60, 60)),
        Box::new(Conduit::new(25, 25)),
        Box::new(Buffer::new(100, 0)),
    ];
    let (head, tail) = chain.split_at_mut(1);
    let moved_in = transfer(head[0].as_mut(), tail[0].as_mut(), 100);
    let (mid, last) = tail.split_at_mut(1);
    let moved_out = transfer(mid[0].as_mut(), last[0].as_mut(), 100);

    assert_eq!((moved_in, moved_out), (25, 25));
    let held: Vec<EnergyAmount> = chain.iter().map(|p| p.energy()).collect();
    assert_eq!(held, vec![35, 0, 25]);
}
