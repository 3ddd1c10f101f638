use crate::{
    db::{
        direction::{NullPlacement, SortDirection},
        order::{SortColumn, SortSpec, SortSpecError, TieBreaker, build_sort_spec},
    },
    value::{MarkerValue, ValueKind},
};
use std::cmp::Ordering;

fn id() -> TieBreaker {
    TieBreaker::new("id", ValueKind::Int)
}

#[test]
fn empty_columns_are_rejected() {
    let err = build_sort_spec(Vec::new(), [id()]).expect_err("empty spec must fail");

    assert_eq!(err, SortSpecError::Empty);
}

#[test]
fn missing_tie_breaker_is_rejected() {
    let err = SortSpec::new([SortColumn::asc("score", ValueKind::Int)], [])
        .expect_err("spec without tie-breaker must fail");

    assert_eq!(err, SortSpecError::MissingTieBreaker);
}

#[test]
fn duplicate_columns_are_rejected() {
    let err = SortSpec::new(
        [
            SortColumn::asc("score", ValueKind::Int),
            SortColumn::desc("score", ValueKind::Int),
        ],
        [id()],
    )
    .expect_err("duplicate column must fail");

    assert_eq!(
        err,
        SortSpecError::DuplicateColumn {
            name: "score".to_string()
        }
    );
}

#[test]
fn empty_column_name_reports_position() {
    let err = SortSpec::new(
        [
            SortColumn::asc("score", ValueKind::Int),
            SortColumn::asc("", ValueKind::Text),
        ],
        [id()],
    )
    .expect_err("empty name must fail");

    assert_eq!(err, SortSpecError::EmptyColumnName { position: 1 });
}

#[test]
fn tie_breaker_is_appended_ascending_with_default_nulls() {
    let spec = SortSpec::new([SortColumn::desc("score", ValueKind::Int)], [id()])
        .expect("spec should build");

    assert_eq!(spec.len(), 2);
    let tail = &spec.columns()[1];
    assert_eq!(tail.name(), "id");
    assert_eq!(tail.direction(), SortDirection::Asc);
    assert_eq!(tail.nulls(), NullPlacement::Last);
}

#[test]
fn tie_breaker_already_present_is_not_duplicated() {
    let spec = SortSpec::new(
        [
            SortColumn::desc("id", ValueKind::Int),
            SortColumn::asc("name", ValueKind::Text),
        ],
        [id()],
    )
    .expect("spec should build");

    assert_eq!(spec.len(), 2);
    assert_eq!(spec.columns()[0].direction(), SortDirection::Desc);
}

#[test]
fn tie_breaker_kind_must_agree_with_existing_column() {
    let err = SortSpec::new(
        [SortColumn::asc("id", ValueKind::Text)],
        [TieBreaker::new("id", ValueKind::Int)],
    )
    .expect_err("kind disagreement must fail");

    assert!(matches!(err, SortSpecError::TieBreakerKindMismatch { .. }));
}

#[test]
fn reversed_spec_flips_direction_and_nulls_and_is_an_involution() {
    let spec = SortSpec::new(
        [SortColumn::asc("score", ValueKind::Int).nulls_first()],
        [id()],
    )
    .expect("spec should build");
    let reversed = spec.reversed();

    assert_eq!(reversed.columns()[0].direction(), SortDirection::Desc);
    assert_eq!(reversed.columns()[0].nulls(), NullPlacement::Last);
    assert_eq!(reversed.reversed(), spec);
}

#[test]
fn null_placement_is_positional_regardless_of_direction() {
    let asc_first = SortColumn::asc("v", ValueKind::Int).nulls_first();
    let desc_first = SortColumn::desc("v", ValueKind::Int).nulls_first();
    let asc_last = SortColumn::asc("v", ValueKind::Int).nulls_last();

    assert_eq!(
        asc_first.compare(&MarkerValue::Null, &MarkerValue::Int(1)),
        Ordering::Less
    );
    assert_eq!(
        desc_first.compare(&MarkerValue::Null, &MarkerValue::Int(1)),
        Ordering::Less
    );
    assert_eq!(
        asc_last.compare(&MarkerValue::Null, &MarkerValue::Int(1)),
        Ordering::Greater
    );
}

#[test]
fn reversed_column_compares_as_exact_mirror() {
    let column = SortColumn::asc("v", ValueKind::Int).nulls_first();
    let mirror = column.reversed();
    let values = [MarkerValue::Null, MarkerValue::Int(-1), MarkerValue::Int(4)];

    for left in &values {
        for right in &values {
            assert_eq!(
                column.compare(left, right),
                mirror.compare(left, right).reverse()
            );
        }
    }
}

#[test]
fn spec_compare_uses_later_columns_only_on_ties() {
    let spec = SortSpec::new([SortColumn::asc("score", ValueKind::Int)], [id()])
        .expect("spec should build");

    let a = [MarkerValue::Int(10), MarkerValue::Int(1)];
    let b = [MarkerValue::Int(10), MarkerValue::Int(2)];
    let c = [MarkerValue::Int(5), MarkerValue::Int(3)];

    assert_eq!(spec.compare(&a, &b), Ordering::Less);
    assert_eq!(spec.compare(&c, &a), Ordering::Less);
    assert_eq!(spec.compare(&a, &a), Ordering::Equal);
}
