use super::*;
use crate::error::StmtError;

fn placeholder_count(sql: &str) -> usize {
    sql.match_indices('$').count()
}

#[test]
fn insert_columns_and_args_in_call_order() {
    let stmt = insert("users")
        .set("username", "alice")
        .set("email", "alice@example.com")
        .set("active", true)
        .build()
        .unwrap();
    assert_eq!(
        stmt.sql,
        "INSERT INTO users (username, email, active) VALUES ($1, $2, $3)"
    );
    assert_eq!(stmt.param_names, ["username", "email", "active"]);
    assert_eq!(stmt.params.len(), 3);
    assert!(stmt.returning.is_empty());
}

#[test]
fn insert_with_returning() {
    let stmt = insert("users")
        .set("username", "alice")
        .returning(&["id", "created_at"])
        .build()
        .unwrap();
    assert_eq!(
        stmt.sql,
        "INSERT INTO users (username) VALUES ($1) RETURNING id, created_at"
    );
    assert_eq!(stmt.returning, ["id", "created_at"]);
}

#[test]
fn insert_set_raw_binds_nothing() {
    let stmt = insert("places")
        .set("name", "hq")
        .set_raw("location", "ST_MakePoint(2.35, 48.85)")
        .set("active", true)
        .build()
        .unwrap();
    assert_eq!(
        stmt.sql,
        "INSERT INTO places (name, location, active) VALUES ($1, ST_MakePoint(2.35, 48.85), $2)"
    );
    assert_eq!(stmt.params.len(), 2);
    assert_eq!(stmt.param_names, ["name", "active"]);
}

#[test]
fn insert_set_overwrites_value_in_place() {
    let stmt = insert("users")
        .set("a", 1)
        .set("b", 2)
        .set("a", 10)
        .build()
        .unwrap();
    assert_eq!(stmt.sql, "INSERT INTO users (a, b) VALUES ($1, $2)");
    assert_eq!(stmt.params.len(), 2);
}

#[test]
fn insert_set_many() {
    let stmt = insert("users")
        .set_many([("first", "ada"), ("last", "lovelace")])
        .build()
        .unwrap();
    assert_eq!(stmt.sql, "INSERT INTO users (first, last) VALUES ($1, $2)");
}

#[test]
fn insert_without_set_params_errors() {
    let err = insert("users").build().unwrap_err();
    assert!(matches!(err, StmtError::MissingSetClause));
}

#[test]
fn update_numbers_set_before_where() {
    // WHERE is configured before SET, but SET is rendered first, so its
    // value takes $1.
    let stmt = update("users")
        .eq("b", 2)
        .set("a", 1)
        .build()
        .unwrap();
    assert_eq!(stmt.sql, "UPDATE users SET a=$1 WHERE b=$2");
    assert_eq!(stmt.param_names, ["a", "b"]);
}

#[test]
fn update_multiple_set_and_where() {
    let stmt = update("users")
        .set("status", "inactive")
        .set("attempts", 0)
        .eq("id", 7)
        .cmp("updated_at", "<", "2026-01-01")
        .returning(&["id"])
        .build()
        .unwrap();
    assert_eq!(
        stmt.sql,
        "UPDATE users SET status=$1,attempts=$2 WHERE id=$3 AND updated_at<$4 RETURNING id"
    );
    assert_eq!(stmt.params.len(), 4);
}

#[test]
fn update_set_raw_in_set_clause() {
    let stmt = update("events")
        .set("name", "launch")
        .set_raw("updated_at", "now()")
        .eq("id", 3)
        .build()
        .unwrap();
    assert_eq!(
        stmt.sql,
        "UPDATE events SET name=$1,updated_at=now() WHERE id=$2"
    );
    assert_eq!(stmt.param_names, ["name", "id"]);
}

#[test]
fn update_without_where_errors() {
    let err = update("users").set("a", 1).build().unwrap_err();
    assert!(matches!(err, StmtError::MissingWhereClause));
}

#[test]
fn select_projection_and_where() {
    let stmt = select("users")
        .returning(&["f", "l"])
        .eq("id", 5)
        .build()
        .unwrap();
    assert_eq!(stmt.sql, "SELECT f, l FROM users WHERE id=$1");
    assert_eq!(stmt.returning, ["f", "l"]);
    assert_eq!(stmt.params.len(), 1);
}

#[test]
fn select_order_by_appends_in_call_order() {
    let stmt = select("users")
        .returning(&["f", "l"])
        .eq("id", 5)
        .order_by("l", "DESC")
        .order_by("f", "ASC")
        .build()
        .unwrap();
    assert_eq!(
        stmt.sql,
        "SELECT f, l FROM users WHERE id=$1 ORDER BY l DESC, f ASC"
    );
}

#[test]
fn select_limit_renders_after_order_by() {
    let stmt = select("users")
        .returning(&["id"])
        .eq("active", true)
        .order_by("id", "ASC")
        .limit(3)
        .build()
        .unwrap();
    assert_eq!(
        stmt.sql,
        "SELECT id FROM users WHERE active=$1 ORDER BY id ASC LIMIT 3"
    );
}

#[test]
fn select_cmp_renders_operator_verbatim() {
    let stmt = select("users")
        .returning(&["id"])
        .cmp("id", ">=", 5)
        .build()
        .unwrap();
    assert_eq!(stmt.sql, "SELECT id FROM users WHERE id>=$1");
}

#[test]
fn select_not_equal_operator() {
    let stmt = select("users")
        .returning(&["id"])
        .cmp("status", "<>", "banned")
        .build()
        .unwrap();
    assert_eq!(stmt.sql, "SELECT id FROM users WHERE status<>$1");
}

#[test]
fn select_match_all_renders_tautology() {
    let stmt = select("users")
        .returning(&["id"])
        .match_all()
        .build()
        .unwrap();
    assert_eq!(stmt.sql, "SELECT id FROM users WHERE 1=1");
    assert!(stmt.params.is_empty());
}

#[test]
fn select_without_projection_errors() {
    let err = select("users").eq("id", 1).build().unwrap_err();
    assert!(matches!(err, StmtError::MissingProjection));
}

#[test]
fn select_without_where_errors() {
    let err = select("users").returning(&["id"]).build().unwrap_err();
    assert!(matches!(err, StmtError::MissingWhereClause));
}

#[test]
fn select_empty_table_always_errors() {
    let err = select("")
        .returning(&["id"])
        .eq("id", 1)
        .order_by("id", "ASC")
        .limit(10)
        .build()
        .unwrap_err();
    assert!(matches!(err, StmtError::MissingTable));
}

#[test]
fn whitespace_table_errors() {
    let err = insert("   ").set("a", 1).build().unwrap_err();
    assert!(matches!(err, StmtError::MissingTable));
}

#[test]
fn delete_with_where_and_returning() {
    let stmt = delete("sessions")
        .eq("user_id", 9)
        .returning(&["id"])
        .build()
        .unwrap();
    assert_eq!(stmt.sql, "DELETE FROM sessions WHERE user_id=$1 RETURNING id");
}

#[test]
fn delete_match_all() {
    let stmt = delete("sessions").match_all().build().unwrap();
    assert_eq!(stmt.sql, "DELETE FROM sessions WHERE 1=1");
    assert!(stmt.params.is_empty());
}

#[test]
fn set_in_select_mode_defers_error() {
    // The setter itself does not panic; the error surfaces at build.
    let err = select("users")
        .returning(&["id"])
        .set("a", 1)
        .eq("id", 1)
        .build()
        .unwrap_err();
    assert!(matches!(err, StmtError::InvalidMode { op: "set" }));
}

#[test]
fn where_in_insert_mode_defers_error() {
    let err = insert("users").set("a", 1).eq("id", 1).build().unwrap_err();
    assert!(matches!(err, StmtError::InvalidMode { op: "eq" }));
}

#[test]
fn order_by_in_update_mode_defers_error() {
    let err = update("users")
        .set("a", 1)
        .eq("id", 1)
        .order_by("id", "ASC")
        .build()
        .unwrap_err();
    assert!(matches!(err, StmtError::InvalidMode { op: "order_by" }));
}

#[test]
fn limit_on_non_select_errors() {
    let err = delete("users").eq("id", 1).limit(3).build().unwrap_err();
    assert!(matches!(err, StmtError::LimitNotSupported));
}

#[test]
fn zero_limit_is_unset() {
    let stmt = select("users")
        .returning(&["id"])
        .eq("id", 1)
        .limit(0)
        .build()
        .unwrap();
    assert!(!stmt.sql.contains("LIMIT"));
}

#[test]
fn empty_operator_errors() {
    let err = select("users")
        .returning(&["id"])
        .cmp("id", "  ", 1)
        .build()
        .unwrap_err();
    assert!(matches!(err, StmtError::MissingOperator { .. }));
}

#[test]
fn empty_order_by_column_errors() {
    let err = select("users")
        .returning(&["id"])
        .eq("id", 1)
        .order_by("", "ASC")
        .build()
        .unwrap_err();
    assert!(matches!(err, StmtError::MissingOrderByColumn));
}

#[test]
fn empty_order_by_direction_errors() {
    let err = select("users")
        .returning(&["id"])
        .eq("id", 1)
        .order_by("id", "")
        .build()
        .unwrap_err();
    assert!(matches!(err, StmtError::MissingOrderByDirection));
}

#[test]
fn second_entry_method_errors() {
    let err = StatementBuilder::new()
        .insert("users")
        .select("users")
        .returning(&["id"])
        .eq("id", 1)
        .build()
        .unwrap_err();
    assert!(matches!(err, StmtError::ModeAlreadySet));
}

#[test]
fn build_without_entry_method_errors() {
    let err = StatementBuilder::new().build().unwrap_err();
    assert!(matches!(err, StmtError::InvalidMode { op: "build" }));
}

#[test]
fn first_error_wins() {
    // Empty table is raised first; the wrong-mode set afterwards is
    // discarded by the write-once slot.
    let err = select("").set("a", 1).build().unwrap_err();
    assert!(matches!(err, StmtError::MissingTable));
}

#[test]
fn placeholder_count_matches_args_across_modes() {
    let built = [
        insert("t").set("a", 1).set("b", 2).build().unwrap(),
        insert("t").set("a", 1).set_raw("b", "now()").build().unwrap(),
        update("t").set("a", 1).eq("b", 2).build().unwrap(),
        delete("t").eq("a", 1).cmp("b", "<>", 2).build().unwrap(),
        select("t")
            .returning(&["a"])
            .eq("a", 1)
            .order_by("a", "ASC")
            .limit(5)
            .build()
            .unwrap(),
        select("t").returning(&["a"]).match_all().build().unwrap(),
    ];
    for stmt in built {
        assert_eq!(
            placeholder_count(&stmt.sql),
            stmt.params.len(),
            "placeholder/argument mismatch in: {}",
            stmt.sql
        );
        assert_eq!(stmt.param_names.len(), stmt.params.len());
    }
}
