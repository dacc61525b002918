//! Walks a statement and collects every function call that carries an
//! `OVER` clause, in the order the calls appear.
//!
//! Statements other than queries, INSERT, UPDATE, DELETE and CREATE
//! TABLE/VIEW are not walked.

use sqlparser::ast::*;

/// Collects the window-function calls of one statement.
pub fn window_calls(statement: &Statement) -> Vec<&Function> {
    let mut calls = Vec::new();
    visit_statement(statement, &mut |expr| {
        if let Expr::Function(function) = expr {
            if function.over.is_some() {
                calls.push(function);
            }
        }
    });
    calls
}

fn visit_statement<'a, F: FnMut(&'a Expr)>(statement: &'a Statement, visitor: &mut F) {
    match statement {
        Statement::Query(query) => visit_query(query, visitor),
        Statement::Insert(insert) => {
            if let Some(source) = &insert.source {
                visit_query(source, visitor);
            }
        }
        Statement::Update {
            assignments,
            selection,
            ..
        } => {
            for assignment in assignments {
                visit_expr(&assignment.value, visitor);
            }
            if let Some(selection) = selection {
                visit_expr(selection, visitor);
            }
        }
        Statement::Delete(delete) => {
            if let Some(selection) = &delete.selection {
                visit_expr(selection, visitor);
            }
        }
        Statement::CreateView { query, .. } => visit_query(query, visitor),
        Statement::CreateTable(create) => {
            if let Some(query) = &create.query {
                visit_query(query, visitor);
            }
        }
        _ => {}
    }
}

fn visit_query<'a, F: FnMut(&'a Expr)>(query: &'a Query, visitor: &mut F) {
    if let Some(with) = &query.with {
        for cte in &with.cte_tables {
            visit_query(&cte.query, visitor);
        }
    }
    visit_set_expr(&query.body, visitor);

    if let Some(order_by) = &query.order_by {
        if let OrderByKind::Expressions(exprs) = &order_by.kind {
            for order_expr in exprs {
                visit_expr(&order_expr.expr, visitor);
            }
        }
    }
}

fn visit_set_expr<'a, F: FnMut(&'a Expr)>(body: &'a SetExpr, visitor: &mut F) {
    match body {
        SetExpr::Select(select) => {
            for table in &select.from {
                visit_table_with_joins(table, visitor);
            }
            for item in &select.projection {
                if let SelectItem::UnnamedExpr(expr) | SelectItem::ExprWithAlias { expr, .. } = item
                {
                    visit_expr(expr, visitor);
                }
            }
            if let Some(selection) = &select.selection {
                visit_expr(selection, visitor);
            }
            if let Some(having) = &select.having {
                visit_expr(having, visitor);
            }
            if let Some(qualify) = &select.qualify {
                visit_expr(qualify, visitor);
            }
        }
        SetExpr::Query(query) => visit_query(query, visitor),
        SetExpr::SetOperation { left, right, .. } => {
            visit_set_expr(left, visitor);
            visit_set_expr(right, visitor);
        }
        _ => {}
    }
}

fn visit_table_with_joins<'a, F: FnMut(&'a Expr)>(table: &'a TableWithJoins, visitor: &mut F) {
    visit_table_factor(&table.relation, visitor);
    for join in &table.joins {
        visit_table_factor(&join.relation, visitor);
        visit_join_operator(&join.join_operator, visitor);
    }
}

fn visit_table_factor<'a, F: FnMut(&'a Expr)>(factor: &'a TableFactor, visitor: &mut F) {
    match factor {
        TableFactor::Derived { subquery, .. } => visit_query(subquery, visitor),
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => visit_table_with_joins(table_with_joins, visitor),
        _ => {}
    }
}

fn visit_join_operator<'a, F: FnMut(&'a Expr)>(operator: &'a JoinOperator, visitor: &mut F) {
    let constraint = match operator {
        JoinOperator::Join(c)
        | JoinOperator::Inner(c)
        | JoinOperator::Left(c)
        | JoinOperator::LeftOuter(c)
        | JoinOperator::Right(c)
        | JoinOperator::RightOuter(c)
        | JoinOperator::FullOuter(c)
        | JoinOperator::CrossJoin(c)
        | JoinOperator::Semi(c)
        | JoinOperator::LeftSemi(c)
        | JoinOperator::RightSemi(c)
        | JoinOperator::Anti(c)
        | JoinOperator::LeftAnti(c)
        | JoinOperator::RightAnti(c)
        | JoinOperator::StraightJoin(c) => c,
        JoinOperator::AsOf {
            match_condition,
            constraint,
        } => {
            visit_expr(match_condition, visitor);
            constraint
        }
        JoinOperator::CrossApply | JoinOperator::OuterApply => return,
    };
    if let JoinConstraint::On(expr) = constraint {
        visit_expr(expr, visitor);
    }
}

/// Visits `expr` before its children, so an outer call precedes the calls
/// nested in its arguments.
fn visit_expr<'a, F: FnMut(&'a Expr)>(expr: &'a Expr, visitor: &mut F) {
    visitor(expr);
    match expr {
        Expr::BinaryOp { left, right, .. }
        | Expr::AnyOp { left, right, .. }
        | Expr::AllOp { left, right, .. }
        | Expr::IsDistinctFrom(left, right)
        | Expr::IsNotDistinctFrom(left, right)
        | Expr::Position {
            expr: left,
            r#in: right,
        }
        | Expr::AtTimeZone {
            timestamp: left,
            time_zone: right,
        } => {
            visit_expr(left, visitor);
            visit_expr(right, visitor);
        }
        Expr::Like { expr, pattern, .. }
        | Expr::ILike { expr, pattern, .. }
        | Expr::SimilarTo { expr, pattern, .. }
        | Expr::RLike { expr, pattern, .. } => {
            visit_expr(expr, visitor);
            visit_expr(pattern, visitor);
        }
        Expr::UnaryOp { expr: inner, .. }
        | Expr::Nested(inner)
        | Expr::Cast { expr: inner, .. }
        | Expr::Convert { expr: inner, .. }
        | Expr::Collate { expr: inner, .. }
        | Expr::Extract { expr: inner, .. }
        | Expr::Ceil { expr: inner, .. }
        | Expr::Floor { expr: inner, .. }
        | Expr::IsNull(inner)
        | Expr::IsNotNull(inner)
        | Expr::IsTrue(inner)
        | Expr::IsNotTrue(inner)
        | Expr::IsFalse(inner)
        | Expr::IsNotFalse(inner)
        | Expr::IsUnknown(inner)
        | Expr::IsNotUnknown(inner) => visit_expr(inner, visitor),
        Expr::Interval(interval) => visit_expr(&interval.value, visitor),
        Expr::Substring {
            expr,
            substring_from,
            substring_for,
            ..
        } => {
            visit_expr(expr, visitor);
            for part in [substring_from, substring_for].into_iter().flatten() {
                visit_expr(part, visitor);
            }
        }
        Expr::Trim {
            expr, trim_what, ..
        } => {
            visit_expr(expr, visitor);
            if let Some(what) = trim_what {
                visit_expr(what, visitor);
            }
        }
        Expr::Tuple(items) | Expr::Array(Array { elem: items, .. }) => {
            for item in items {
                visit_expr(item, visitor);
            }
        }
        Expr::Case {
            operand,
            conditions,
            else_result,
            ..
        } => {
            if let Some(operand) = operand {
                visit_expr(operand, visitor);
            }
            for case_when in conditions {
                visit_expr(&case_when.condition, visitor);
                visit_expr(&case_when.result, visitor);
            }
            if let Some(else_result) = else_result {
                visit_expr(else_result, visitor);
            }
        }
        Expr::Function(function) => match &function.args {
            FunctionArguments::Subquery(query) => visit_query(query, visitor),
            FunctionArguments::List(list) => {
                for arg in &list.args {
                    match arg {
                        FunctionArg::Unnamed(FunctionArgExpr::Expr(expr))
                        | FunctionArg::Named {
                            arg: FunctionArgExpr::Expr(expr),
                            ..
                        }
                        | FunctionArg::ExprNamed {
                            arg: FunctionArgExpr::Expr(expr),
                            ..
                        } => visit_expr(expr, visitor),
                        _ => {}
                    }
                }
            }
            FunctionArguments::None => {}
        },
        Expr::InSubquery {
            expr: inner,
            subquery,
            ..
        } => {
            visit_expr(inner, visitor);
            visit_query(subquery, visitor);
        }
        Expr::Subquery(query) | Expr::Exists { subquery: query, .. } => {
            visit_query(query, visitor)
        }
        Expr::Between {
            expr, low, high, ..
        } => {
            visit_expr(expr, visitor);
            visit_expr(low, visitor);
            visit_expr(high, visitor);
        }
        Expr::InList { expr, list, .. } => {
            visit_expr(expr, visitor);
            for item in list {
                visit_expr(item, visitor);
            }
        }
        _ => {}
    }
}
