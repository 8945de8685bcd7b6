use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Literal(f64),
    Variable(String),
    Binary(char, Box<Expression>, Box<Expression>),
    Call(String, Vec<Expression>),
}

impl Expression {
    pub fn binary(op: char, lhs: Expression, rhs: Expression) -> Self {
        Expression::Binary(op, Box::new(lhs), Box::new(rhs))
    }
}

/// A function signature: its name and ordered parameter names.
///
/// Parameter names are not checked for duplicates.
#[derive(Debug, PartialEq, Clone)]
pub struct Prototype {
    pub name: String,
    pub args: Vec<String>,
}

impl Prototype {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// The nameless, parameterless signature given to top-level expressions.
    pub fn anonymous() -> Self {
        Self::new("", Vec::new())
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty() && self.args.is_empty()
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Function {
    pub prototype: Prototype,
    pub body: Expression,
}

impl Function {
    /// Wraps a standalone expression so it can be treated as a top-level unit.
    pub fn anonymous(body: Expression) -> Self {
        Self {
            prototype: Prototype::anonymous(),
            body,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.prototype.is_anonymous()
    }
}

/// One unit handed back to the driver.
#[derive(Debug, PartialEq, Clone)]
pub enum TopLevel {
    Definition(Function),
    Extern(Prototype),
    Expression(Function),
}

impl TopLevel {
    pub fn kind(&self) -> &'static str {
        match self {
            TopLevel::Definition(_) => "function definition",
            TopLevel::Extern(_) => "extern",
            TopLevel::Expression(_) => "top-level expression",
        }
    }
}

// Rendering is fully parenthesized so the output re-parses to the same tree.

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // one digit past f64::MAX so the run overflows back to infinity
            Expression::Literal(value) if *value == f64::INFINITY => {
                write!(f, "{:.0}0", f64::MAX)
            }
            Expression::Literal(value) => write!(f, "{}", value),
            Expression::Variable(name) => write!(f, "{}", name),
            Expression::Binary(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op, rhs),
            Expression::Call(callee, args) => {
                write!(f, "{}(", callee)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Prototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.args.join(" "))
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_anonymous() {
            write!(f, "{}", self.body)
        } else {
            write!(f, "def {} {}", self.prototype, self.body)
        }
    }
}

impl fmt::Display for TopLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopLevel::Definition(function) | TopLevel::Expression(function) => {
                write!(f, "{}", function)
            }
            TopLevel::Extern(prototype) => write!(f, "extern {}", prototype),
        }
    }
}
