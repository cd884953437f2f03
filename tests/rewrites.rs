mod common;

use common::{assert_invariants, canonical_pairs, init_logger};
use saturate::{rewrite, EGraph, Term};

#[test]
fn identity_rule() {
    init_logger();
    let mut egraph = EGraph::default();

    let a = egraph.add_term("a");
    let b = egraph.add_term("b");
    let c = egraph.add_term("c");
    let one = egraph.add_term("1");

    let ab = egraph.add_operation("*", [a, b]);
    let bc = egraph.add_operation("+", [b, c]);
    let abbc = egraph.add_operation("*", [ab, bc]);

    // (a*b)*((b+c)*1)
    let bc1 = egraph.add_operation("*", [bc, one]);
    let id1 = egraph.add_operation("*", [ab, bc1]);

    // ((a*1)*b)*(b+(c*1))
    let a1 = egraph.add_operation("*", [a, one]);
    let a1b = egraph.add_operation("*", [a1, b]);
    let c1 = egraph.add_operation("*", [c, one]);
    let bc1_inner = egraph.add_operation("+", [b, c1]);
    let id2 = egraph.add_operation("*", [a1b, bc1_inner]);

    // ((a*b)*(b+c))*1 and (((a*b)*(b+c))*1)*1
    let id3 = egraph.add_operation("*", [abbc, one]);
    let id4 = egraph.add_operation("*", [id3, one]);

    egraph.restore_invariants();
    assert_ne!(egraph.find(id1), egraph.find(abbc));
    assert_ne!(egraph.find(id2), egraph.find(abbc));

    let rule = rewrite!("mul-one"; "(* ?x 1)" => "?x");
    egraph.rewrite(&rule);

    // one pass reaches everything: direct matches plus the congruences
    // they trigger
    for id in [id1, id2, id3, id4] {
        assert_eq!(egraph.find(id), egraph.find(abbc));
    }
    assert_ne!(egraph.find(ab), egraph.find(a));
    assert_ne!(egraph.find(abbc), egraph.find(one));
    assert_invariants(&egraph);
}

#[test]
fn absorbing_rule_needs_two_passes() {
    init_logger();
    let mut egraph = EGraph::default();

    let a = egraph.add_term("a");
    let b = egraph.add_term("b");
    let c = egraph.add_term("c");
    let d = egraph.add_term("d");
    let zero = egraph.add_term("0");

    // ((a-b)+c) * ((b-c)*0)
    let amb = egraph.add_operation("-", [a, b]);
    let ambc = egraph.add_operation("+", [amb, c]);
    let bmc = egraph.add_operation("-", [b, c]);
    let bmc0 = egraph.add_operation("*", [bmc, zero]);
    let zero1 = egraph.add_operation("*", [ambc, bmc0]);

    // ((a*(b+c))*d)*0
    let bpc = egraph.add_operation("+", [b, c]);
    let abpc = egraph.add_operation("*", [a, bpc]);
    let abpcd = egraph.add_operation("*", [abpc, d]);
    let zero2 = egraph.add_operation("*", [abpcd, zero]);

    // ((a-b)*0)*((b+c)*0)
    let amb0 = egraph.add_operation("*", [amb, zero]);
    let bpc0 = egraph.add_operation("*", [bpc, zero]);
    let zero3 = egraph.add_operation("*", [amb0, bpc0]);

    egraph.restore_invariants();

    let rule = rewrite!("mul-zero"; "(* ?x 0)" => "0");

    // the first pass only reaches terms whose zero was visible before
    // any rewriting
    egraph.rewrite(&rule);
    assert_eq!(egraph.find(zero2), egraph.find(zero));
    assert_ne!(egraph.find(zero1), egraph.find(zero));
    assert_ne!(egraph.find(zero3), egraph.find(zero));
    assert_invariants(&egraph);

    // the second pass sees 0*0 and friends in their outer contexts
    egraph.rewrite(&rule);
    for id in [zero1, zero2, zero3] {
        assert_eq!(egraph.find(id), egraph.find(zero));
    }
    assert_ne!(egraph.find(amb), egraph.find(zero));
    assert_ne!(egraph.find(bpc), egraph.find(zero));
    assert_invariants(&egraph);
}

#[test]
fn associativity_rule() {
    init_logger();
    let mut egraph = EGraph::default();

    let a = egraph.add_term("a");
    let b = egraph.add_term("b");
    let c = egraph.add_term("c");
    let d = egraph.add_term("d");

    let ab = egraph.add_operation("+", [a, b]);
    let bc = egraph.add_operation("+", [b, c]);
    let cd = egraph.add_operation("+", [c, d]);

    let abc1 = egraph.add_operation("+", [ab, c]);
    let abc2 = egraph.add_operation("+", [a, bc]);

    let b_cd = egraph.add_operation("+", [b, cd]);
    let abcd1 = egraph.add_operation("+", [a, b_cd]);
    let abcd2 = egraph.add_operation("+", [abc1, d]);

    egraph.restore_invariants();
    assert_ne!(egraph.find(abc1), egraph.find(abc2));

    let rule = rewrite!("assoc-add"; "(+ (+ ?x ?y) ?z)" => "(+ ?x (+ ?y ?z))");

    egraph.rewrite(&rule);
    assert_eq!(egraph.find(abc1), egraph.find(abc2));
    assert_ne!(egraph.find(abcd1), egraph.find(abcd2));
    assert_invariants(&egraph);

    // reassociating the four-operand chain composes the rule with
    // itself, so it needs one more pass
    let before = canonical_pairs(&egraph);
    egraph.rewrite(&rule);
    assert_eq!(egraph.find(abcd1), egraph.find(abcd2));
    assert_ne!(egraph.find(abc1), egraph.find(abcd1));
    assert_invariants(&egraph);

    // rewriting never splits classes
    for (x, y) in before {
        assert_eq!(egraph.find(x), egraph.find(y));
    }
}

#[test]
fn distributivity_rule() {
    init_logger();
    let mut egraph = EGraph::default();

    let ten = egraph.add_term("10");
    let twenty = egraph.add_term("20");
    let thirty = egraph.add_term("30");
    let forty = egraph.add_term("40");

    // (10 + ((20+20) * 30)) * 40
    let tt = egraph.add_operation("+", [twenty, twenty]);
    let m = egraph.add_operation("*", [tt, thirty]);
    let sum1 = egraph.add_operation("+", [ten, m]);
    let e1 = egraph.add_operation("*", [sum1, forty]);

    // (10 * 40) + (((20+20) * 30) * 40)
    let ten40 = egraph.add_operation("*", [ten, forty]);
    let m40 = egraph.add_operation("*", [m, forty]);
    let e2 = egraph.add_operation("+", [ten40, m40]);

    // (10 + ((20*30) + (20*30))) * 40
    let n1 = egraph.add_operation("*", [twenty, thirty]);
    let n = egraph.add_operation("+", [n1, n1]);
    let sum3 = egraph.add_operation("+", [ten, n]);
    let e3 = egraph.add_operation("*", [sum3, forty]);

    egraph.restore_invariants();
    assert_ne!(egraph.find(e1), egraph.find(e2));
    assert_ne!(egraph.find(e1), egraph.find(e3));

    let rule = rewrite!("distribute"; "(* (+ ?x ?y) ?z)" => "(+ (* ?x ?z) (* ?y ?z))");
    egraph.rewrite(&rule);

    assert_eq!(egraph.find(e1), egraph.find(e2));
    assert_eq!(egraph.find(e1), egraph.find(e3));
    assert_eq!(egraph.find(m), egraph.find(n));
    assert_invariants(&egraph);
}

#[test]
fn commutativity_is_its_own_inverse() {
    init_logger();
    let mut egraph = EGraph::default();

    let a = egraph.add_term("a");
    let b = egraph.add_term("b");
    let c = egraph.add_term("c");
    let ab = egraph.add_operation("+", [a, b]);
    let root = egraph.add_operation("+", [ab, c]);
    egraph.restore_invariants();

    let rule = rewrite!("commute-add"; "(+ ?a ?b)" => "(+ ?b ?a)");

    egraph.rewrite(&rule);
    let after_one = egraph.number_of_classes();
    let terms_after_one = egraph.total_size();

    let flipped_inner = egraph.lookup(Term::new("+", [b, a]));
    assert_eq!(flipped_inner.map(|id| egraph.find(id)), Some(egraph.find(ab)));
    let flipped_outer = egraph.lookup(Term::new("+", [c, ab]));
    assert_eq!(flipped_outer.map(|id| egraph.find(id)), Some(egraph.find(root)));

    // a second pass only rediscovers the flipped terms
    egraph.rewrite(&rule);
    assert_eq!(egraph.number_of_classes(), after_one);
    assert_eq!(egraph.total_size(), terms_after_one);
    assert_invariants(&egraph);
}
