//! Declarations for names first bound inside nested blocks.
//!
//! A JavaScript `let` ends with its block, a Python binding does not. A name
//! first assigned in a branch, loop or handler body is declared once in
//! front of the compound statement and assigned inside it:
//!
//! ```text
//! if c:              let y;
//!     y = 1          if (c) {
//! else:                  y = 1;
//!     y = 2          } else {
//! print(y)               y = 2;
//!                    }
//!                    console.log(y);
//! ```
//!
//! Loop variables and handler aliases belong to their own statement and are
//! left out.

use pyjs_parser::ast::{Block, Expr, Stmt};

use super::StmtTranslator;

impl StmtTranslator<'_> {
    /// `let a, b;` for the names `stmt` binds in its nested blocks that the
    /// current block cannot see a declaration of yet.
    pub(super) fn hoisted_declaration(&mut self, stmt: &Stmt<'_>) -> Option<String> {
        let mut names = Vec::new();
        collect_compound(stmt, &mut Vec::new(), &mut names);
        names.retain(|name| !self.ctx.is_let_bound(name));
        if names.is_empty() {
            return None;
        }

        for name in &names {
            self.ctx.record_let(name);
        }
        Some(format!("let {};", names.join(", ")))
    }
}

fn collect_compound<'ast>(
    stmt: &Stmt<'ast>,
    excluded: &mut Vec<&'ast str>,
    names: &mut Vec<&'ast str>,
) {
    match stmt {
        Stmt::If(if_stmt) => {
            for branch in if_stmt.branches {
                collect_block(&branch.body, excluded, names);
            }
            if let Some(else_body) = &if_stmt.else_body {
                collect_block(else_body, excluded, names);
            }
        }
        Stmt::While(while_stmt) => {
            collect_block(&while_stmt.body, excluded, names);
            if let Some(else_body) = &while_stmt.else_body {
                collect_block(else_body, excluded, names);
            }
        }
        Stmt::For(for_stmt) => {
            let target = for_stmt.target.as_name().map(|ident| ident.name);
            excluded.extend(target);
            collect_block(&for_stmt.body, excluded, names);
            if target.is_some() {
                excluded.pop();
            }
            if let Some(else_body) = &for_stmt.else_body {
                collect_block(else_body, excluded, names);
            }
        }
        Stmt::Try(try_stmt) => {
            collect_block(&try_stmt.body, excluded, names);
            for handler in try_stmt.handlers {
                let alias = handler.alias.map(|ident| ident.name);
                excluded.extend(alias);
                collect_block(&handler.body, excluded, names);
                if alias.is_some() {
                    excluded.pop();
                }
            }
            for block in [&try_stmt.else_body, &try_stmt.finally_body]
                .into_iter()
                .flatten()
            {
                collect_block(block, excluded, names);
            }
        }
        _ => {}
    }
}

fn collect_block<'ast>(
    block: &Block<'ast>,
    excluded: &mut Vec<&'ast str>,
    names: &mut Vec<&'ast str>,
) {
    for stmt in block.stmts {
        let target = match stmt {
            Stmt::Assign(assign) => match assign.targets {
                [target] => assigned_name(target),
                _ => None,
            },
            Stmt::AnnAssign(ann) => assigned_name(ann.target),
            other => {
                collect_compound(other, excluded, names);
                None
            }
        };
        if let Some(name) = target
            && !excluded.contains(&name)
            && !names.contains(&name)
        {
            names.push(name);
        }
    }
}

fn assigned_name<'ast>(target: &Expr<'ast>) -> Option<&'ast str> {
    target.as_name().map(|ident| ident.name)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run;

    #[test]
    fn branch_assignments_are_declared_up_front() {
        let source = "if c:\n    y = 1\nelse:\n    y = 2\nprint(y)\n";
        assert_eq!(
            run(&["c"], source),
            "let y;\nif (c) {\n    y = 1;\n} else {\n    y = 2;\n}\nconsole.log(y);"
        );
    }

    #[test]
    fn loop_body_assignments_outlive_the_loop() {
        let source = "\
n = 0
while n < 3:
    last = n
    n += 1
print(last)
";
        assert_eq!(
            run(&[], source),
            "\
let n = 0;
let last;
while (n < 3) {
    last = n;
    n += 1;
}
console.log(last);"
        );
    }

    #[test]
    fn nested_blocks_share_one_declaration() {
        let source = "\
if a:
    if b:
        x = 1
        y: int = 2
    x = 3
";
        assert_eq!(
            run(&["a", "b"], source),
            "\
let x, y;
if (a) {
    if (b) {
        x = 1;
        y = 2;
    }
    x = 3;
}"
        );
    }

    #[test]
    fn declared_names_are_not_hoisted() {
        assert_eq!(
            run(&["c"], "x = 0\nif c:\n    x = 1\n"),
            "let x = 0;\nif (c) {\n    x = 1;\n}"
        );
    }

    #[test]
    fn loop_variables_and_aliases_are_left_alone() {
        assert_eq!(
            run(&["xs"], "for x in xs:\n    x = x + 1\n"),
            "for (let x of xs) {\n    x = x + 1;\n}"
        );
        let source = "try:\n    pass\nexcept Exception as err:\n    err = None\n";
        assert_eq!(
            run(&[], source),
            "try {\n} catch (err) {\n    err = null;\n}"
        );
    }

    #[test]
    fn function_bodies_get_their_own_declarations() {
        let source = "\
def f(c):
    if c:
        r = 1
    else:
        r = 2
    return r
";
        assert_eq!(
            run(&[], source),
            "\
function f(c) {
    let r;
    if (c) {
        r = 1;
    } else {
        r = 2;
    }
    return r;
}"
        );
    }
}
