use crate::LogicalOp;
use quadview_model::{GraphNamePattern, GroundTerm, TriplePattern};
use std::fmt::{Display, Formatter, Result, Write};

impl Display for LogicalOp {
    /// Renders the tree with one operator per line. Children are indented by two spaces.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        self.fmt_indented(f, 0)
    }
}

impl LogicalOp {
    fn fmt_indented(&self, f: &mut Formatter<'_>, depth: usize) -> Result {
        write!(f, "{:indent$}", "", indent = depth * 2)?;
        self.fmt_node(f)?;
        for child in self.children() {
            writeln!(f)?;
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }

    fn fmt_node(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            LogicalOp::Bgp { patterns } => {
                f.write_str("Bgp")?;
                write_patterns(f, patterns)
            }
            LogicalOp::Triple { pattern } => {
                f.write_str("Triple")?;
                write_patterns(f, std::slice::from_ref(pattern))
            }
            LogicalOp::QuadPattern {
                graph_name,
                patterns,
            } => {
                f.write_str("QuadPattern ")?;
                write_graph_name(f, graph_name)?;
                write_patterns(f, patterns)
            }
            LogicalOp::Path {
                subject,
                path,
                object,
            } => write!(f, "Path: {subject} {path} {object}"),
            LogicalOp::Join { .. } => f.write_str("Join"),
            LogicalOp::LeftJoin { expression, .. } => match expression {
                None => f.write_str("LeftJoin"),
                Some(expression) => write!(f, "LeftJoin: {expression}"),
            },
            LogicalOp::Union { .. } => f.write_str("Union"),
            LogicalOp::Minus { .. } => f.write_str("Minus"),
            LogicalOp::Filter { expressions, .. } => {
                f.write_str("Filter: ")?;
                write_separated(f, expressions, ", ")
            }
            LogicalOp::Graph { name, .. } => write!(f, "Graph: {name}"),
            LogicalOp::Assign { assignments, .. } => {
                f.write_str("Assign: ")?;
                for (i, (variable, expression)) in assignments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{variable} := {expression}")?;
                }
                Ok(())
            }
            LogicalOp::Values {
                variables,
                bindings,
            } => {
                if self.is_join_identity() {
                    return f.write_str("Table: unit");
                }
                f.write_str("Table: ")?;
                write_separated(f, variables, " ")?;
                for row in bindings {
                    f.write_str(" (")?;
                    for (i, value) in row.iter().enumerate() {
                        if i > 0 {
                            f.write_char(' ')?;
                        }
                        write_binding(f, value.as_ref())?;
                    }
                    f.write_char(')')?;
                }
                Ok(())
            }
            LogicalOp::DatasetNames { graph_name } => write!(f, "DatasetNames: {graph_name}"),
            LogicalOp::Project { variables, .. } => {
                f.write_str("Project: ")?;
                write_separated(f, variables, ", ")
            }
            LogicalOp::Distinct { .. } => f.write_str("Distinct"),
            LogicalOp::Reduced { .. } => f.write_str("Reduced"),
            LogicalOp::Slice { start, length, .. } => match length {
                None => write!(f, "Slice: start={start}"),
                Some(length) => write!(f, "Slice: start={start}, length={length}"),
            },
            LogicalOp::OrderBy { expressions, .. } => {
                f.write_str("OrderBy: ")?;
                write_separated(f, expressions, ", ")
            }
            LogicalOp::Group {
                variables,
                aggregates,
                ..
            } => {
                f.write_str("Group: ")?;
                write_separated(f, variables, ", ")?;
                for (variable, aggregate) in aggregates {
                    write!(f, ", {variable} := {aggregate}")?;
                }
                Ok(())
            }
            LogicalOp::Service { name, silent, .. } => {
                if *silent {
                    write!(f, "Service: SILENT {name}")
                } else {
                    write!(f, "Service: {name}")
                }
            }
        }
    }
}

fn write_patterns(f: &mut Formatter<'_>, patterns: &[TriplePattern]) -> Result {
    for pattern in patterns {
        write!(
            f,
            " ({} {} {})",
            pattern.subject, pattern.predicate, pattern.object
        )?;
    }
    Ok(())
}

fn write_graph_name(f: &mut Formatter<'_>, graph_name: &GraphNamePattern) -> Result {
    match graph_name {
        GraphNamePattern::NamedNode(nn) => write!(f, "{nn}"),
        GraphNamePattern::Variable(variable) => write!(f, "{variable}"),
        GraphNamePattern::DefaultGraph => f.write_str("DEFAULT"),
    }
}

fn write_binding(f: &mut Formatter<'_>, value: Option<&GroundTerm>) -> Result {
    match value {
        None => f.write_str("UNDEF"),
        Some(value) => write!(f, "{value}"),
    }
}

fn write_separated<T: Display>(f: &mut Formatter<'_>, items: &[T], separator: &str) -> Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
