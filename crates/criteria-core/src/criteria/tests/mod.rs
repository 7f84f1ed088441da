
use crate::{
    criteria::{
        CollectionCriteria, ComparableCriteria, CriteriaContext, Criterion, ObjectCriteria,
        OptionalCriteria, SelfComparable, StringCriteria,
    },
    error::{CriteriaError, ErrorClass, LiteralError},
    expr::{AttributeRef, Expression, Literal, Operator, Path},
    value::{Value, ValueKind},
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// ---- helpers -----------------------------------------------------------

pub(super) fn attr(name: &str, kind: ValueKind) -> Expression {
    Expression::attribute(AttributeRef::new(name, kind))
}

pub(super) fn lit(value: Value) -> Expression {
    Expression::literal(Literal::new(value).expect("non-null literal"))
}

/// Expected attribute predicate node.
pub(super) fn node(op: Operator, name: &str, kind: ValueKind, value: Value) -> Expression {
    Expression::binary(op, attr(name, kind), lit(value)).expect("well-formed node")
}

pub(super) fn unary(op: Operator, name: &str, kind: ValueKind) -> Expression {
    Expression::unary(op, attr(name, kind)).expect("well-formed node")
}

pub(super) fn and(operands: Vec<Expression>) -> Expression {
    Expression::and(operands).expect("predicate operands")
}

pub(super) fn or(operands: Vec<Expression>) -> Expression {
    Expression::or(operands).expect("predicate operands")
}

fn age() -> ComparableCriteria<Criterion, i64> {
    ComparableCriteria::new(Criterion::context().bind::<i64>("age"))
}

fn age_node(op: Operator, n: i64) -> Expression {
    node(op, "age", ValueKind::Int, Value::Int(n))
}

fn assert_send_sync<T: Send + Sync>() {}

// ---- ordering operators --------------------------------------------------

#[test]
fn at_least_produces_exactly_one_node() {
    let result = age().is_at_least(18).unwrap();

    assert_eq!(
        result.expression(),
        &age_node(Operator::GreaterThanOrEqual, 18)
    );
}

#[test]
fn strict_and_inclusive_upper_bounds_differ_only_in_operator() {
    let strict = age().is_less_than(65).unwrap().into_expression();
    let inclusive = age().is_at_most(65).unwrap().into_expression();

    let strict = strict.as_call().unwrap();
    let inclusive = inclusive.as_call().unwrap();

    assert_eq!(strict.op(), Operator::LessThan);
    assert_eq!(inclusive.op(), Operator::LessThanOrEqual);
    assert_eq!(strict.operands(), inclusive.operands());
    assert_eq!(
        strict.operands(),
        &[attr("age", ValueKind::Int), lit(Value::Int(65))]
    );
}

#[test]
fn strict_and_inclusive_lower_bounds_differ_only_in_operator() {
    let strict = age().is_greater_than(18).unwrap().into_expression();
    let inclusive = age().is_at_least(18).unwrap().into_expression();

    let strict = strict.as_call().unwrap();
    let inclusive = inclusive.as_call().unwrap();

    assert_eq!(strict.op(), Operator::GreaterThan);
    assert_eq!(inclusive.op(), Operator::GreaterThanOrEqual);
    assert_eq!(strict.operands(), inclusive.operands());
}

#[test]
fn external_and_preserves_combination_order() {
    let b = age();
    let adult = b.is_at_least(18).unwrap();
    let under_65 = b.is_less_than(65).unwrap();

    let combined = adult.clone().and(under_65.clone());
    assert_eq!(
        combined.expression(),
        &and(vec![
            age_node(Operator::GreaterThanOrEqual, 18),
            age_node(Operator::LessThan, 65),
        ])
    );

    let reversed = under_65.and(adult);
    assert_eq!(
        reversed.expression(),
        &and(vec![
            age_node(Operator::LessThan, 65),
            age_node(Operator::GreaterThanOrEqual, 18),
        ])
    );
}

#[test]
fn repeated_calls_are_independent() {
    let b = age();

    let first = b.is_less_than(10).unwrap();
    let second = b.is_less_than(10).unwrap();

    assert_eq!(first, second);
    assert_eq!(b.context().expression(), None);

    // the builder remains usable for unrelated calls
    let third = b.is_greater_than(1).unwrap();
    assert_eq!(third.expression(), &age_node(Operator::GreaterThan, 1));
}

#[test]
fn between_and_half_open_ranges() {
    let closed = age().is_between(18, 65).unwrap();
    assert_eq!(
        closed.expression(),
        &and(vec![
            age_node(Operator::GreaterThanOrEqual, 18),
            age_node(Operator::LessThanOrEqual, 65),
        ])
    );

    let half_open = age().is_in_range(18, 65).unwrap();
    assert_eq!(
        half_open.expression(),
        &and(vec![
            age_node(Operator::GreaterThanOrEqual, 18),
            age_node(Operator::LessThan, 65),
        ])
    );
}

// ---- absent literals -----------------------------------------------------

#[test]
fn absent_literal_is_rejected_by_every_ordering_operator() {
    let b: ComparableCriteria<Criterion, Option<i64>> =
        ComparableCriteria::new(Criterion::context().bind::<Option<i64>>("age"));

    let cases: [(Operator, Result<Criterion, CriteriaError>); 4] = [
        (Operator::LessThan, b.is_less_than(None)),
        (Operator::GreaterThan, b.is_greater_than(None)),
        (Operator::LessThanOrEqual, b.is_at_most(None)),
        (Operator::GreaterThanOrEqual, b.is_at_least(None)),
    ];

    for (op, result) in cases {
        let err = result.unwrap_err();
        assert_eq!(
            err,
            CriteriaError::InvalidArgument {
                attribute: "age".to_string(),
                operator: op,
                source: LiteralError::Null,
            }
        );
        assert_eq!(err.class(), ErrorClass::InvalidArgument);
    }

    // present values still work on the same builder
    assert_eq!(
        b.is_at_least(Some(18)).unwrap().expression(),
        &age_node(Operator::GreaterThanOrEqual, 18)
    );
}

#[test]
fn rejected_literal_never_reaches_the_continuation() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let context = CriteriaContext::new(move |_: CriteriaContext<usize>| {
        counter.fetch_add(1, Ordering::SeqCst) + 1
    })
    .bind::<Option<i64>>("age");
    let b: ComparableCriteria<usize, Option<i64>> = ComparableCriteria::new(context);

    assert!(b.is_less_than(None).is_err());
    assert!(b.is_between(Some(1), None).is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert_eq!(b.is_less_than(Some(1)).unwrap(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn membership_rejects_absent_elements() {
    let b: ObjectCriteria<Criterion, Option<i64>> =
        ObjectCriteria::new(Criterion::context().bind::<Option<i64>>("age"));

    let err = b.is_in([Some(1), None, Some(3)]).unwrap_err();
    assert_eq!(
        err,
        CriteriaError::InvalidArgument {
            attribute: "age".to_string(),
            operator: Operator::In,
            source: LiteralError::NullElement { index: 1 },
        }
    );
}

// ---- context invariants --------------------------------------------------

#[test]
fn unbound_context_is_an_invariant_violation() {
    let b: ComparableCriteria<Criterion, i64> = ComparableCriteria::new(Criterion::context());

    let err = b.is_less_than(1).unwrap_err();
    assert_eq!(err.class(), ErrorClass::InvariantViolation);
}

#[test]
fn context_bound_to_foreign_kind_is_caught_by_registry() {
    let b: ComparableCriteria<Criterion, i64> =
        ComparableCriteria::new(Criterion::context().bind::<String>("age"));

    let err = b.is_less_than(1).unwrap_err();
    assert_eq!(
        err,
        CriteriaError::TypeMismatch {
            operator: Operator::LessThan,
            expected: ValueKind::Text,
            found: ValueKind::Int,
        }
    );
}

#[test]
fn empty_context_materializes_nothing() {
    let context = Criterion::context();

    assert_eq!(context.expression(), None);
    assert_eq!(context.or().expression(), None);
    assert_eq!(Criterion::from_context(context), Criterion::always(true));
}

/// Continuation that hands the folded context straight back.
struct Folded(CriteriaContext<Self>);

#[test]
fn child_nests_below_the_bound_attribute_and_keeps_the_tree() {
    let root = CriteriaContext::new(Folded);
    assert_eq!(root.attribute(), None);

    let address = root.child("address", ValueKind::Text);
    assert_eq!(address.attribute().unwrap().path.segments(), &["address".to_string()]);

    let city = address.child("city", ValueKind::Text);
    assert_eq!(
        city.attribute(),
        Some(&AttributeRef::new(Path::new("address").child("city"), ValueKind::Text))
    );

    let Folded(after) = city.create(Operator::Equal, &"Oslo".to_string()).unwrap();
    let city_node = Expression::binary(
        Operator::Equal,
        Expression::attribute(city.attribute().unwrap().clone()),
        lit(Value::Text("Oslo".to_string())),
    )
    .unwrap();
    assert_eq!(after.expression(), Some(city_node.clone()));

    // rebinding keeps what has been folded so far
    let zip = after.child("zip", ValueKind::Uint);
    assert_eq!(zip.attribute().unwrap().path.to_string(), "address.city.zip");
    assert_eq!(zip.expression(), Some(city_node.clone()));

    let Folded(both) = zip.create(Operator::LessThan, &9000_u64).unwrap();
    let zip_node = Expression::binary(
        Operator::LessThan,
        Expression::attribute(zip.attribute().unwrap().clone()),
        lit(Value::Uint(9000)),
    )
    .unwrap();
    assert_eq!(both.expression(), Some(and(vec![city_node, zip_node])));
}

// ---- self-referencing variant --------------------------------------------

#[test]
fn self_variant_chains_into_a_conjunction() {
    let score = SelfComparable::<i64>::new("score");

    let bounded: SelfComparable<i64> = score.is_at_least(1).unwrap().is_less_than(10).unwrap();

    assert_eq!(
        bounded.expression(),
        Some(and(vec![
            node(Operator::GreaterThanOrEqual, "score", ValueKind::Int, Value::Int(1)),
            node(Operator::LessThan, "score", ValueKind::Int, Value::Int(10)),
        ]))
    );
    assert_eq!(score.expression(), None);
}

#[test]
fn self_variant_single_call_is_unwrapped() {
    let score = SelfComparable::<u32>::new("score");
    let at_most = score.is_at_most(7).unwrap();

    assert_eq!(
        at_most.expression(),
        Some(node(
            Operator::LessThanOrEqual,
            "score",
            ValueKind::Uint,
            Value::Uint(7)
        ))
    );
}

#[test]
fn self_variant_or_starts_a_new_disjunct() {
    let score = SelfComparable::<i64>::new("score");

    let outside = score
        .is_less_than(0)
        .unwrap()
        .or()
        .is_greater_than(100)
        .unwrap()
        .is_not_equal_to(150)
        .unwrap();

    assert_eq!(
        outside.expression(),
        Some(or(vec![
            node(Operator::LessThan, "score", ValueKind::Int, Value::Int(0)),
            and(vec![
                node(Operator::GreaterThan, "score", ValueKind::Int, Value::Int(100)),
                node(Operator::NotEqual, "score", ValueKind::Int, Value::Int(150)),
            ]),
        ]))
    );
}

#[test]
fn self_variant_intermediate_results_stay_reusable() {
    let score = SelfComparable::<i64>::new("score");
    let positive = score.is_greater_than(0).unwrap();

    let small = positive.is_less_than(10).unwrap();
    let large = positive.is_at_least(1000).unwrap();

    assert_ne!(small.expression(), large.expression());
    assert_eq!(
        positive.expression(),
        Some(node(Operator::GreaterThan, "score", ValueKind::Int, Value::Int(0)))
    );
}

// ---- object / string / optional / collection -----------------------------

#[test]
fn equality_and_membership() {
    let b = age();

    assert_eq!(
        b.is_equal_to(3).unwrap().expression(),
        &age_node(Operator::Equal, 3)
    );
    assert_eq!(
        b.is_in([3, 1, 2]).unwrap().expression(),
        &node(
            Operator::In,
            "age",
            ValueKind::Int,
            Value::List(vec![Value::Int(3), Value::Int(1), Value::Int(2)])
        )
    );
    assert_eq!(
        b.is_not_in(Vec::<i64>::new()).unwrap().expression(),
        &node(Operator::NotIn, "age", ValueKind::Int, Value::List(vec![]))
    );
}

#[test]
fn string_criteria_operators() {
    let name = StringCriteria::new(Criterion::context().bind::<String>("name"));
    let text = |s: &str| Value::Text(s.to_string());

    assert_eq!(
        name.starts_with("Jo").unwrap().expression(),
        &node(Operator::StartsWith, "name", ValueKind::Text, text("Jo"))
    );
    assert_eq!(
        name.ends_with("hn").unwrap().expression(),
        &node(Operator::EndsWith, "name", ValueKind::Text, text("hn"))
    );
    assert_eq!(
        name.contains("oh").unwrap().expression(),
        &node(Operator::Contains, "name", ValueKind::Text, text("oh"))
    );
    assert_eq!(
        name.is_empty().unwrap().expression(),
        &unary(Operator::IsEmpty, "name", ValueKind::Text)
    );
    assert_eq!(
        name.is_not_empty().unwrap().expression(),
        &unary(Operator::IsNotEmpty, "name", ValueKind::Text)
    );

    // ordering and equality come through deref
    assert_eq!(
        name.is_less_than("M".to_string()).unwrap().expression(),
        &node(Operator::LessThan, "name", ValueKind::Text, text("M"))
    );
    assert_eq!(
        name.is_equal_to("John".to_string()).unwrap().expression(),
        &node(Operator::Equal, "name", ValueKind::Text, text("John"))
    );
}

#[test]
fn optional_criteria_operators() {
    let nickname: OptionalCriteria<Criterion, String> =
        OptionalCriteria::new(Criterion::context().bind::<String>("nickname"));

    assert_eq!(
        nickname.is_present().unwrap().expression(),
        &unary(Operator::IsPresent, "nickname", ValueKind::Text)
    );
    assert_eq!(
        nickname.is_absent().unwrap().expression(),
        &unary(Operator::IsAbsent, "nickname", ValueKind::Text)
    );
    assert_eq!(
        nickname.value().is_equal_to("Bo".to_string()).unwrap().expression(),
        &node(
            Operator::Equal,
            "nickname",
            ValueKind::Text,
            Value::Text("Bo".to_string())
        )
    );
    assert_eq!(
        nickname
            .comparable()
            .is_at_most("M".to_string())
            .unwrap()
            .expression(),
        &node(
            Operator::LessThanOrEqual,
            "nickname",
            ValueKind::Text,
            Value::Text("M".to_string())
        )
    );
}

#[test]
fn collection_criteria_operators() {
    let tags: CollectionCriteria<Criterion, String> = CollectionCriteria::new(
        Criterion::context().with_attribute(AttributeRef::new("tags", ValueKind::List)),
    );

    assert_eq!(
        tags.contains("red".to_string()).unwrap().expression(),
        &node(
            Operator::Contains,
            "tags",
            ValueKind::List,
            Value::Text("red".to_string())
        )
    );
    assert_eq!(
        tags.has_size(2).unwrap().expression(),
        &node(Operator::HasSize, "tags", ValueKind::List, Value::Uint(2))
    );
    assert_eq!(
        tags.is_empty().unwrap().expression(),
        &unary(Operator::IsEmpty, "tags", ValueKind::List)
    );
    assert_eq!(
        tags.is_not_empty().unwrap().expression(),
        &unary(Operator::IsNotEmpty, "tags", ValueKind::List)
    );
}

// ---- Criterion combinators -----------------------------------------------

#[test]
fn combinators_never_flatten() {
    let a = age().is_equal_to(1).unwrap();
    let b = age().is_equal_to(2).unwrap();
    let c = age().is_equal_to(3).unwrap();

    let nested = (a.clone() & b.clone()) & c.clone();
    assert_eq!(
        nested.expression(),
        &and(vec![
            and(vec![a.clone().into_expression(), b.clone().into_expression()]),
            c.clone().into_expression(),
        ])
    );

    let either = a.clone() | b.clone();
    assert_eq!(
        either.expression(),
        &or(vec![a.clone().into_expression(), b.into_expression()])
    );

    let negated = !a.clone();
    assert_eq!(
        negated.expression(),
        &Expression::not(a.into_expression()).unwrap()
    );
}

#[test]
fn criterion_requires_a_predicate() {
    assert!(Criterion::new(attr("active", ValueKind::Bool)).is_ok());

    let err = Criterion::new(attr("age", ValueKind::Int)).unwrap_err();
    assert_eq!(
        err,
        CriteriaError::NotPredicate {
            found: ValueKind::Int
        }
    );
    assert_eq!(err.class(), ErrorClass::TypeMismatch);
    assert_eq!(err.to_string(), "expression of kind Int is not a predicate");

    // the same check guards deserialization
    let literal = serde_json::to_string(&lit(Value::Int(3))).unwrap();
    assert!(serde_json::from_str::<Criterion>(&literal).is_err());
}

#[test]
fn criterion_round_trips_through_json() {
    let criterion = age().is_between(18, 65).unwrap();
    let json = serde_json::to_string(&criterion).unwrap();

    assert_eq!(serde_json::from_str::<Criterion>(&json).unwrap(), criterion);
}

// ---- sharing -------------------------------------------------------------

#[test]
fn builders_are_shareable_across_threads() {
    assert_send_sync::<SelfComparable<i64>>();
    assert_send_sync::<ComparableCriteria<Criterion, String>>();
    assert_send_sync::<CriteriaContext<Criterion>>();
    assert_send_sync::<Expression>();

    let b = age();
    let results: Vec<Criterion> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let b = &b;
                scope.spawn(move || b.is_at_least(i).unwrap())
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, result) in (0_i64..).zip(&results) {
        assert_eq!(result.expression(), &age_node(Operator::GreaterThanOrEqual, i));
    }
}
