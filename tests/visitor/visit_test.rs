use katydid::ast::{
    descendants, visit_statement, AstNode, Expr, Ident, ObjectName, Statement, VisitError, Visitor,
};
use katydid::dialect::GenericDialect;
use katydid::{parse, render};

fn parse_one(sql: &str) -> Statement {
    let mut statements = parse(&GenericDialect {}, sql).expect("statement should parse");
    statements.pop().expect("one statement")
}

/// Replaces every identifier part named `from` with `to`, wherever it
/// appears: bare identifiers, compound identifiers, and object names.
struct RenameIdent {
    from: &'static str,
    to: &'static str,
}

impl RenameIdent {
    fn rename(&self, ident: Ident) -> Ident {
        if ident.value == self.from && ident.quote_style.is_none() {
            Ident::new(self.to)
        } else {
            ident
        }
    }
}

impl Visitor for RenameIdent {
    fn pre_visit_expr(&mut self, expr: Expr) -> Result<Expr, VisitError> {
        Ok(match expr {
            Expr::Identifier(ident) => Expr::Identifier(self.rename(ident)),
            Expr::CompoundIdentifier(parts) => Expr::CompoundIdentifier(
                parts.into_iter().map(|part| self.rename(part)).collect(),
            ),
            other => other,
        })
    }

    fn pre_visit_object_name(&mut self, name: ObjectName) -> Result<ObjectName, VisitError> {
        Ok(ObjectName(
            name.0.into_iter().map(|part| self.rename(part)).collect(),
        ))
    }
}

struct NoOp;
impl Visitor for NoOp {}

/// Counts hook invocations per privileged kind.
#[derive(Default)]
struct Counter {
    statements: usize,
    queries: usize,
    exprs: usize,
    table_factors: usize,
    object_names: usize,
}

impl Visitor for Counter {
    fn pre_visit_statement(&mut self, statement: Statement) -> Result<Statement, VisitError> {
        self.statements += 1;
        Ok(statement)
    }
    fn pre_visit_query(
        &mut self,
        query: katydid::ast::Query,
    ) -> Result<katydid::ast::Query, VisitError> {
        self.queries += 1;
        Ok(query)
    }
    fn pre_visit_expr(&mut self, expr: Expr) -> Result<Expr, VisitError> {
        self.exprs += 1;
        Ok(expr)
    }
    fn pre_visit_table_factor(
        &mut self,
        factor: katydid::ast::TableFactor,
    ) -> Result<katydid::ast::TableFactor, VisitError> {
        self.table_factors += 1;
        Ok(factor)
    }
    fn pre_visit_object_name(&mut self, name: ObjectName) -> Result<ObjectName, VisitError> {
        self.object_names += 1;
        Ok(name)
    }
}

#[test]
fn test_noop_visitor_returns_equal_tree() {
    let statement = parse_one("SELECT a, sum(b) FROM t JOIN u ON t.id = u.id GROUP BY a");
    let visited = visit_statement(statement.clone(), &mut NoOp).unwrap();
    assert_eq!(visited, statement);
}

#[test]
fn test_rename_rewrites_everywhere() {
    let statement = parse_one("SELECT a FROM a JOIN b ON a = b.a");
    let mut visitor = RenameIdent { from: "a", to: "x" };
    let rewritten = visit_statement(statement, &mut visitor).unwrap();
    assert_eq!(render(&rewritten), "SELECT x FROM x JOIN b ON x = b.x");
}

#[test]
fn test_rename_leaves_unrelated_subtrees_equal() {
    let statement = parse_one("SELECT a, b FROM a JOIN b ON TRUE");
    let original = statement.clone();
    let mut visitor = RenameIdent { from: "a", to: "x" };
    let rewritten = visit_statement(statement, &mut visitor).unwrap();

    // the rewritten tree differs, the untouched parts are still equal
    assert_ne!(rewritten, original);
    let originals: Vec<String> = descendants(&original)
        .filter_map(|node| match node {
            AstNode::Expr(Expr::Identifier(ident)) => Some(ident.value.clone()),
            _ => None,
        })
        .collect();
    let rewrittens: Vec<String> = descendants(&rewritten)
        .filter_map(|node| match node {
            AstNode::Expr(Expr::Identifier(ident)) => Some(ident.value.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(originals, vec!["a", "b"]);
    assert_eq!(rewrittens, vec!["x", "b"]);
}

#[test]
fn test_hooks_fire_for_every_privileged_kind() {
    let statement = parse_one("SELECT a FROM t WHERE b IN (SELECT c FROM u)");
    let mut counter = Counter::default();
    visit_statement(statement, &mut counter).unwrap();
    assert_eq!(counter.statements, 1);
    assert_eq!(counter.queries, 2); // outer query and the IN subquery
    assert_eq!(counter.table_factors, 2); // t and u
    assert_eq!(counter.object_names, 2); // their names
    assert!(counter.exprs >= 4); // a, b, c, and the IN expression
}

#[test]
fn test_descendants_enumerates_preorder_without_duplicates() {
    let statement = parse_one("SELECT a + b FROM t");
    let rendered: Vec<String> = descendants(&statement)
        .map(|node| format!("{:?}", node).chars().take(20).collect())
        .collect();
    // statement, query, expr (a + b), a, b, table factor, object name
    assert_eq!(rendered.len(), 7);

    let exprs: Vec<String> = descendants(&statement)
        .filter_map(|node| match node {
            AstNode::Expr(expr) => Some(render(expr)),
            _ => None,
        })
        .collect();
    assert_eq!(exprs, vec!["a + b", "a", "b"]);
}

#[test]
fn test_visit_error_aborts_and_propagates() {
    struct Refuse;
    impl Visitor for Refuse {
        fn pre_visit_expr(&mut self, expr: Expr) -> Result<Expr, VisitError> {
            match expr {
                Expr::Identifier(ident) if ident.value == "secret" => {
                    Err(VisitError::new("secret column is off limits"))
                }
                other => Ok(other),
            }
        }
    }

    let statement = parse_one("SELECT a, secret FROM t");
    let err = visit_statement(statement, &mut Refuse).unwrap_err();
    assert!(err.to_string().contains("off limits"));
}

#[test]
fn test_rewrite_inside_ddl_default() {
    let statement = parse_one("CREATE TABLE t (a INT DEFAULT old_value)");
    let mut visitor = RenameIdent {
        from: "old_value",
        to: "new_value",
    };
    let rewritten = visit_statement(statement, &mut visitor).unwrap();
    assert_eq!(
        render(&rewritten),
        "CREATE TABLE t (a INT DEFAULT new_value)"
    );
}

#[test]
fn test_rewrite_table_names_in_dml() {
    let statement = parse_one("INSERT INTO old_table (a) VALUES (1)");
    let mut visitor = RenameIdent {
        from: "old_table",
        to: "new_table",
    };
    let rewritten = visit_statement(statement, &mut visitor).unwrap();
    assert_eq!(render(&rewritten), "INSERT INTO new_table (a) VALUES (1)");
}
