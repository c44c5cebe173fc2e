// Syntax tree definitions for the expression language

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Semantic types of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Integer,
    Float,
    Char,
}

impl DataType {
    /// Map a `TYPE` keyword to the type it declares (`int` is `INTEGER`).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "int" => Some(DataType::Integer),
            "float" => Some(DataType::Float),
            "char" => Some(DataType::Char),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Float => "FLOAT",
            DataType::Char => "CHAR",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinOp::Add),
            "-" => Some(BinOp::Sub),
            "*" => Some(BinOp::Mul),
            "/" => Some(BinOp::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Value of an integer literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegerLiteral {
    Fixed(i64),
    /// Digits of a literal too wide for `i64`
    Wide(String),
}

impl fmt::Display for IntegerLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegerLiteral::Fixed(n) => write!(f, "{n}"),
            IntegerLiteral::Wide(digits) => f.write_str(digits),
        }
    }
}

/// Expression nodes.
///
/// `Variable` and `Binary` carry a `resolved` annotation filled in by
/// validation; the syntactic shape of the node never changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Integer(IntegerLiteral, SourceLocation),
    Float(f64, SourceLocation),
    Char(String, SourceLocation),
    Variable {
        name: String,
        resolved: Option<DataType>,
        location: SourceLocation,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        resolved: Option<DataType>,
        location: SourceLocation,
    },
}

impl Expr {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::Integer(_, loc) | Expr::Float(_, loc) | Expr::Char(_, loc) => *loc,
            Expr::Variable { location, .. } | Expr::Binary { location, .. } => *location,
        }
    }

    /// Type of a literal leaf, `None` for variables and operators.
    pub fn literal_type(&self) -> Option<DataType> {
        match self {
            Expr::Integer(..) => Some(DataType::Integer),
            Expr::Float(..) => Some(DataType::Float),
            Expr::Char(..) => Some(DataType::Char),
            Expr::Variable { .. } | Expr::Binary { .. } => None,
        }
    }

    /// Semantic type of this node, if known.
    pub fn resolved_type(&self) -> Option<DataType> {
        match self {
            Expr::Variable { resolved, .. } | Expr::Binary { resolved, .. } => *resolved,
            _ => self.literal_type(),
        }
    }

    fn outline(&self, depth: usize, out: &mut Vec<OutlineLine>) {
        match self {
            Expr::Integer(n, _) => out.push(OutlineLine::new(depth, "INTEGER", n.to_string())),
            Expr::Float(x, _) => out.push(OutlineLine::new(depth, "FLOAT", format!("{x:?}"))),
            Expr::Char(s, _) => out.push(OutlineLine::new(depth, "CHAR", s.clone())),
            Expr::Variable { name, resolved, .. } => out.push(
                OutlineLine::new(depth, "VARIABLE", name.clone()).annotated(*resolved),
            ),
            Expr::Binary {
                op,
                left,
                right,
                resolved,
                ..
            } => {
                out.push(OutlineLine::new(depth, "OPERATOR", op.symbol()).annotated(*resolved));
                left.outline(depth + 1, out);
                right.outline(depth + 1, out);
            }
        }
    }
}

/// `TYPE VARIABLE (ASSIGN Expression)? SEMICOLON`
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    /// Keyword as written in the source (`int`, `float`, `char`)
    pub type_keyword: String,
    pub declared_type: DataType,
    pub initializer: Option<Expr>,
    pub location: SourceLocation,
}

/// `VARIABLE ASSIGN Expression SEMICOLON`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: String,
    /// Stored type of the target at the time of the assignment
    pub target_type: DataType,
    pub value: Expr,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Declaration(Declaration),
    Assignment(Assignment),
}

impl Statement {
    pub fn location(&self) -> SourceLocation {
        match self {
            Statement::Declaration(decl) => decl.location,
            Statement::Assignment(assign) => assign.location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatementList {
    pub statements: Vec<Statement>,
}

/// Root of the syntax tree
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statement_list: StatementList,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statement_list.statements
    }

    /// Flatten the tree into indented lines, parents before children.
    pub fn outline(&self) -> Vec<OutlineLine> {
        let mut out = vec![
            OutlineLine::bare(0, "Program"),
            OutlineLine::bare(1, "StatementList"),
        ];

        for statement in self.statements() {
            out.push(OutlineLine::bare(2, "Statement"));
            match statement {
                Statement::Declaration(decl) => match &decl.initializer {
                    Some(init) => {
                        out.push(OutlineLine::new(3, "Declaration", "DECLARATION_WITH_ASSIGNMENT"));
                        out.push(OutlineLine::new(4, "ASSIGN", "="));
                        out.push(
                            OutlineLine::new(5, "VARIABLE", decl.name.clone())
                                .annotated(Some(decl.declared_type)),
                        );
                        init.outline(5, &mut out);
                        out.push(OutlineLine::new(4, "TYPE", decl.type_keyword.clone()));
                    }
                    None => {
                        out.push(OutlineLine::new(3, "Declaration", "DECLARATION"));
                        out.push(OutlineLine::new(4, "TYPE", decl.type_keyword.clone()));
                        out.push(
                            OutlineLine::new(4, "VARIABLE", decl.name.clone())
                                .annotated(Some(decl.declared_type)),
                        );
                    }
                },
                Statement::Assignment(assign) => {
                    out.push(OutlineLine::bare(3, "Assignment"));
                    out.push(OutlineLine::new(4, "ASSIGN", "="));
                    out.push(
                        OutlineLine::new(5, "VARIABLE", assign.target.clone())
                            .annotated(Some(assign.target_type)),
                    );
                    assign.value.outline(5, &mut out);
                }
            }
        }

        out
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.outline() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// One line of [`Program::outline`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineLine {
    pub depth: usize,
    pub kind: &'static str,
    pub value: Option<String>,
    /// Resolved semantic type, for variables and operators
    pub annotation: Option<DataType>,
}

impl OutlineLine {
    fn new(depth: usize, kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            depth,
            kind,
            value: Some(value.into()),
            annotation: None,
        }
    }

    fn bare(depth: usize, kind: &'static str) -> Self {
        Self {
            depth,
            kind,
            value: None,
            annotation: None,
        }
    }

    fn annotated(mut self, annotation: Option<DataType>) -> Self {
        self.annotation = annotation;
        self
    }
}

impl fmt::Display for OutlineLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:width$}{}", "", self.kind, width = self.depth * 2)?;
        if let Some(value) = &self.value {
            write!(f, ": {value}")?;
        }
        if let Some(ty) = self.annotation {
            write!(f, " <{ty}>")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SourceLocation {
        SourceLocation::new(1, 1)
    }

    #[test]
    fn test_keyword_mapping() {
        assert_eq!(DataType::from_keyword("int"), Some(DataType::Integer));
        assert_eq!(DataType::from_keyword("float"), Some(DataType::Float));
        assert_eq!(DataType::from_keyword("char"), Some(DataType::Char));
        assert_eq!(DataType::from_keyword("double"), None);
    }

    #[test]
    fn test_outline_of_declaration() {
        let program = Program {
            statement_list: StatementList {
                statements: vec![Statement::Declaration(Declaration {
                    name: "x".to_string(),
                    type_keyword: "int".to_string(),
                    declared_type: DataType::Integer,
                    initializer: Some(Expr::Binary {
                        op: BinOp::Add,
                        left: Box::new(Expr::Integer(IntegerLiteral::Fixed(1), loc())),
                        right: Box::new(Expr::Variable {
                            name: "y".to_string(),
                            resolved: Some(DataType::Integer),
                            location: loc(),
                        }),
                        resolved: Some(DataType::Integer),
                        location: loc(),
                    }),
                    location: loc(),
                })],
            },
        };

        let expected = "\
Program
  StatementList
    Statement
      Declaration: DECLARATION_WITH_ASSIGNMENT
        ASSIGN: =
          VARIABLE: x <INTEGER>
          OPERATOR: + <INTEGER>
            INTEGER: 1
            VARIABLE: y <INTEGER>
        TYPE: int
";
        assert_eq!(program.to_string(), expected);
    }

    #[test]
    fn test_empty_program_outline() {
        let lines = Program::new().outline();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].kind, "Program");
        assert_eq!(lines[1].kind, "StatementList");
        assert_eq!(lines[1].depth, 1);
    }
}
