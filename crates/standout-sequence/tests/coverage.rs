//! End-to-end scenarios across the public API.

use standout_sequence::{Dir, OrderedMap, Query, QueryableSequence, SequenceError, SortKey};

#[derive(Debug, Clone, PartialEq)]
struct Employee {
    name: &'static str,
    team: &'static str,
    level: u8,
    salary: u64,
    skills: Vec<&'static str>,
}

fn staff() -> QueryableSequence<Employee> {
    vec![
        Employee {
            name: "Ana",
            team: "infra",
            level: 3,
            salary: 120,
            skills: vec!["rust", "k8s"],
        },
        Employee {
            name: "Ben",
            team: "web",
            level: 2,
            salary: 90,
            skills: vec!["ts"],
        },
        Employee {
            name: "Cy",
            team: "infra",
            level: 2,
            salary: 95,
            skills: vec![],
        },
        Employee {
            name: "Dee",
            team: "web",
            level: 3,
            salary: 130,
            skills: vec!["ts", "rust"],
        },
        Employee {
            name: "Eli",
            team: "data",
            level: 1,
            salary: 70,
            skills: vec!["sql"],
        },
    ]
    .into()
}

// ============================================================================
// Worked examples
// ============================================================================

#[test]
fn group_by_and_distinct_count_example() {
    let numbers: QueryableSequence<i32> = vec![1, 2, 2, 3, 3, 3].into();

    let groups = numbers.group_by(|n| *n);
    let expected: OrderedMap<i32, QueryableSequence<i32>> = vec![
        (1, vec![1].into()),
        (2, vec![2, 2].into()),
        (3, vec![3, 3, 3].into()),
    ]
    .into_iter()
    .collect();
    assert_eq!(groups, expected);

    let counts = numbers.distinct_count_by(|n| *n);
    let expected: OrderedMap<i32, usize> = vec![(1, 1), (2, 2), (3, 3)].into_iter().collect();
    assert_eq!(counts, expected);
}

#[test]
fn to_dict_example() {
    let pairs: QueryableSequence<(&str, i32)> = vec![("a", 1), ("a", 2)].into();
    let dict = pairs.to_dict(|p| p.0, |p| p.1);

    let expected: OrderedMap<&str, i32> = vec![("a", 2)].into_iter().collect();
    assert_eq!(dict, expected);
}

#[test]
fn first_on_empty_returns_default() {
    let empty: QueryableSequence<&str> = QueryableSequence::new();
    assert_eq!(*empty.first_or(|_| true, &"none"), "none");
}

#[test]
fn sum_of_empty_is_zero() {
    let empty: QueryableSequence<Employee> = QueryableSequence::new();
    assert_eq!(empty.sum_of(|e| e.salary), 0);
    assert_eq!(empty.checked_sum_of(|e| e.salary), Ok(0));
}

// ============================================================================
// Chained pipelines
// ============================================================================

#[test]
fn payroll_by_team() {
    let payroll = staff()
        .group_by(|e| e.team)
        .into_iter()
        .map(|(team, members)| (team, members.sum_of(|e| e.salary)))
        .collect::<OrderedMap<_, _>>();

    let entries: Vec<_> = payroll.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(entries, vec![("infra", 215), ("web", 220), ("data", 70)]);
}

#[test]
fn skills_flattened_and_deduplicated() {
    let skills = staff().select_many(|e| e.skills.clone()).distinct();
    assert_eq!(skills, vec!["rust", "k8s", "ts", "sql"]);

    let demand = staff().select_many(|e| e.skills.clone()).distinct_count();
    assert_eq!(demand["rust"], 2);
    assert_eq!(demand["sql"], 1);
}

#[test]
fn senior_roster_sorted() {
    let roster = staff()
        .filter(|e| e.level >= 2)
        .order_by(|e| (e.team, std::cmp::Reverse(e.salary)))
        .select(|e| e.name);

    assert_eq!(roster, vec!["Ana", "Cy", "Dee", "Ben"]);
}

#[test]
fn order_by_keys_with_mixed_types() {
    let keys = vec![
        SortKey::desc(|e: &Employee| e.level),
        SortKey::asc(|e: &Employee| e.name),
    ];
    let sorted = staff().order_by_keys(&keys).select(|e| e.name);

    assert_eq!(sorted, vec!["Ana", "Dee", "Ben", "Cy", "Eli"]);
}

#[test]
fn paging_through_sorted_results() {
    let by_salary = staff().order_by(|e| e.salary);

    let page1 = by_salary.take(2).select(|e| e.name);
    let page2 = by_salary.skip(2).take(2).select(|e| e.name);
    let page3 = by_salary.skip(4).take(2).select(|e| e.name);

    assert_eq!(page1, vec!["Eli", "Ben"]);
    assert_eq!(page2, vec!["Cy", "Ana"]);
    assert_eq!(page3, vec!["Dee"]);
    assert!(by_salary.skip(6).is_empty());
}

#[test]
fn rotation_matches_skip_then_take() {
    let names = staff().select(|e| e.name);

    for n in 0..=names.len() {
        let rotated = names.shift(n as isize);
        assert_eq!(rotated, names.skip(n).concat(&names.take(n)));
    }
}

#[test]
fn count_variants() {
    let team = staff();

    assert_eq!(team.count(), 5);
    assert_eq!(team.count_where(|e| e.skills.is_empty()), 1);
    assert_eq!(team.count_where(|_| false), 0);
}

#[test]
fn lookup_index_by_name() {
    let index = staff().to_dict_by_key(|e| e.name);

    assert_eq!(index.len(), 5);
    assert_eq!(index["Dee"].salary, 130);
    assert!(index.get("Zed").is_none());
}

#[test]
fn single_and_errors() {
    let team = staff();

    assert_eq!(team.single(|e| e.team == "data").map(|e| e.name), Ok("Eli"));
    assert_eq!(
        team.single(|e| e.level == 3).unwrap_err(),
        SequenceError::MultipleMatches { count: 2 }
    );
    assert_eq!(
        team.single(|e| e.level == 9).unwrap_err().to_string(),
        "no element matched the predicate"
    );
}

#[test]
fn partial_order_sort() {
    let scores: QueryableSequence<(&str, f64)> =
        vec![("a", 0.7), ("b", 0.2), ("c", 0.7), ("d", 0.1)].into();

    let ranked = scores.try_order_by_partial(|s| s.1).unwrap().select(|s| s.0);
    assert_eq!(ranked, vec!["d", "b", "a", "c"]);

    let with_nan: QueryableSequence<f64> = vec![0.0, 1.0, f64::NAN].into();
    assert!(matches!(
        with_nan.try_order_by_partial(|v| *v),
        Err(SequenceError::Incomparable { .. })
    ));
}

#[test]
fn error_messages() {
    assert_eq!(
        SequenceError::Incomparable { left: 1, right: 4 }.to_string(),
        "sort keys at positions 1 and 4 are not comparable"
    );
    assert_eq!(
        SequenceError::MultipleMatches { count: 3 }.to_string(),
        "expected exactly one matching element, found 3"
    );
    assert_eq!(
        SequenceError::Overflow.to_string(),
        "arithmetic overflow while aggregating"
    );
}

// ============================================================================
// Query plans
// ============================================================================

#[test]
fn query_plan_reused_across_sequences() {
    let plan = Query::new()
        .and(|e: &Employee| e.level >= 2)
        .not(|e: &Employee| e.team == "web")
        .order_by(|e: &Employee| e.salary, Dir::Desc)
        .build();

    let first = plan.apply(&staff()).select(|e| e.name);
    assert_eq!(first, vec!["Ana", "Cy"]);

    let mut more = staff();
    more.push(Employee {
        name: "Fay",
        team: "data",
        level: 4,
        salary: 150,
        skills: vec!["sql", "rust"],
    });
    let second = plan.apply(&more).select(|e| e.name);
    assert_eq!(second, vec!["Fay", "Ana", "Cy"]);
}

#[test]
fn query_debug_output() {
    let plan: Query<'_, Employee> = Query::new().and(|e: &Employee| e.level > 1).limit(3);
    let rendered = format!("{:?}", plan);

    assert!(rendered.contains("and: 1"));
    assert!(rendered.contains("limit: Some(3)"));
}

// ============================================================================
// Container behavior
// ============================================================================

#[test]
fn iteration_and_indexing() {
    let team = staff();

    let mut seen = Vec::new();
    for e in &team {
        seen.push(e.name);
    }
    assert_eq!(seen, vec!["Ana", "Ben", "Cy", "Dee", "Eli"]);
    assert_eq!(team[3].name, "Dee");
    assert_eq!(team.get(5), None);
    assert_eq!(team.as_ref().len(), 5);
}

#[test]
fn queries_leave_receiver_untouched() {
    let team = staff();
    let snapshot = team.clone();

    let _ = team.order_by_desc(|e| e.salary);
    let _ = team.distinct_by(|e| e.team);
    let _ = team.group_by(|e| e.level);
    let _ = team.shift(-2);
    let _ = team.reversed();

    assert_eq!(team, snapshot);
}
