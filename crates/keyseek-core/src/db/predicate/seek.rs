use crate::{
    db::{
        cursor::{CursorError, Marker},
        direction::{NullPlacement, ScanDirection, SortDirection},
        order::{SortColumn, SortSpec},
        predicate::Predicate,
    },
    value::MarkerValue,
};

///
/// Build the seek predicate selecting rows strictly after (`Forward`) or
/// strictly before (`Backward`) `marker` in `spec`'s declared order.
///
/// The predicate is a disjunction over prefix positions `i`: every column
/// before `i` equals its marker value, and column `i` lies beyond its marker
/// value. Backward scans build the same shape over the reversed columns.
///
/// Null marker components compare through `IS NULL` / `IS NOT NULL` so the
/// result never relies on `= NULL`.
///
pub fn build_seek_predicate(
    spec: &SortSpec,
    marker: &Marker,
    scan: ScanDirection,
) -> Result<Predicate, CursorError> {
    if marker.len() != spec.len() {
        return Err(CursorError::ArityMismatch {
            expected: spec.len(),
            found: marker.len(),
        });
    }

    let mut prefix: Vec<Predicate> = Vec::with_capacity(spec.len());
    let mut terms: Vec<Predicate> = Vec::with_capacity(spec.len());

    for (column, value) in spec.columns().iter().zip(marker.values()) {
        let effective = match scan {
            ScanDirection::Forward => column.clone(),
            ScanDirection::Backward => column.reversed(),
        };

        let after = after_term(&effective, value);
        if after != Predicate::False {
            let term = if prefix.is_empty() {
                after
            } else {
                let mut parts = prefix.clone();
                parts.push(after);
                Predicate::And(parts)
            };
            terms.push(term);
        }

        prefix.push(equal_term(column.name(), value));
    }

    Ok(match terms.len() {
        0 => Predicate::False,
        1 => terms.remove(0),
        _ => Predicate::Or(terms),
    })
}

// Rows whose value in `column` sorts strictly after `value`.
fn after_term(column: &SortColumn, value: &MarkerValue) -> Predicate {
    let name = column.name();

    if value.is_null() {
        return match column.nulls() {
            NullPlacement::First => Predicate::is_not_null(name),
            NullPlacement::Last => Predicate::False,
        };
    }

    let beyond = match column.direction() {
        SortDirection::Asc => Predicate::gt(name, value.clone()),
        SortDirection::Desc => Predicate::lt(name, value.clone()),
    };

    match column.nulls() {
        NullPlacement::First => beyond,
        NullPlacement::Last => Predicate::Or(vec![beyond, Predicate::is_null(name)]),
    }
}

fn equal_term(name: &str, value: &MarkerValue) -> Predicate {
    if value.is_null() {
        Predicate::is_null(name)
    } else {
        Predicate::eq(name, value.clone())
    }
}
