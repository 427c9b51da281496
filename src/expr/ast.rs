/// The unary functions an expression may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryFunc {
    Sin,
    Cos,
    Tan,
    Exp,
    Log,
    Sqrt,
    Abs,
}

impl UnaryFunc {
    /// Resolves a lowercase identifier against the function whitelist.
    pub fn from_name(name: &str) -> Option<UnaryFunc> {
        match name {
            "sin" => Some(UnaryFunc::Sin),
            "cos" => Some(UnaryFunc::Cos),
            "tan" => Some(UnaryFunc::Tan),
            "exp" => Some(UnaryFunc::Exp),
            "log" | "ln" => Some(UnaryFunc::Log),
            "sqrt" => Some(UnaryFunc::Sqrt),
            "abs" => Some(UnaryFunc::Abs),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UnaryFunc::Sin => "sin",
            UnaryFunc::Cos => "cos",
            UnaryFunc::Tan => "tan",
            UnaryFunc::Exp => "exp",
            UnaryFunc::Log => "log",
            UnaryFunc::Sqrt => "sqrt",
            UnaryFunc::Abs => "abs",
        }
    }

    pub fn apply(&self, v: f64) -> f64 {
        match self {
            UnaryFunc::Sin => v.sin(),
            UnaryFunc::Cos => v.cos(),
            UnaryFunc::Tan => v.tan(),
            UnaryFunc::Exp => v.exp(),
            UnaryFunc::Log => v.ln(),
            UnaryFunc::Sqrt => v.sqrt(),
            UnaryFunc::Abs => v.abs(),
        }
    }
}

/// A parsed expression over the free variable `x`.
///
/// Evaluation is a direct tree walk with IEEE-754 semantics: `log` of a
/// negative value is NaN, division by zero is ±Inf. After a successful
/// parse, evaluation cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(f64),
    Var,
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Call(UnaryFunc, Box<Expr>),
}

impl Expr {
    /// Evaluates the expression with the free variable bound to `x`.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Expr::Num(v) => *v,
            Expr::Var => x,
            Expr::Add(a, b) => a.eval(x) + b.eval(x),
            Expr::Sub(a, b) => a.eval(x) - b.eval(x),
            Expr::Mul(a, b) => a.eval(x) * b.eval(x),
            Expr::Div(a, b) => a.eval(x) / b.eval(x),
            Expr::Pow(a, b) => a.eval(x).powf(b.eval(x)),
            Expr::Call(func, arg) => func.apply(arg.eval(x)),
        }
    }
}
