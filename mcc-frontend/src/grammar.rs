//! Grammar productions
//!
//! The fifteen productions of the MiniC grammar as a closed enum, so
//! that observers dispatch on meaning rather than on a numeric index.
//! Nonterminals follow the usual precedence climb: `E` (expression),
//! `A` (term), `B` (factor).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A production of the MiniC grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Production {
    /// P -> S_list
    Program,
    /// S_list -> S ; S_list
    StmtListCons,
    /// S_list -> S ;
    StmtListLast,
    /// S -> D id
    Declare,
    /// D -> int
    DeclInt,
    /// S -> id = E
    Assign,
    /// S -> return E
    Return,
    /// E -> E + A
    AddExpr,
    /// E -> E - A
    SubExpr,
    /// E -> A
    ExprFromTerm,
    /// A -> A * B
    MulTerm,
    /// A -> B
    TermFromFactor,
    /// B -> ( E )
    Parenthesized,
    /// B -> id
    FactorFromId,
    /// B -> IntConst
    FactorFromConst,
}

impl Production {
    /// Number of symbols on the production's right-hand side
    pub fn rhs_len(&self) -> usize {
        match self {
            Production::Program => 1,
            Production::StmtListCons => 3,
            Production::StmtListLast => 2,
            Production::Declare => 2,
            Production::DeclInt => 1,
            Production::Assign => 3,
            Production::Return => 2,
            Production::AddExpr => 3,
            Production::SubExpr => 3,
            Production::ExprFromTerm => 1,
            Production::MulTerm => 3,
            Production::TermFromFactor => 1,
            Production::Parenthesized => 3,
            Production::FactorFromId => 1,
            Production::FactorFromConst => 1,
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = match self {
            Production::Program => "P -> S_list",
            Production::StmtListCons => "S_list -> S ; S_list",
            Production::StmtListLast => "S_list -> S ;",
            Production::Declare => "S -> D id",
            Production::DeclInt => "D -> int",
            Production::Assign => "S -> id = E",
            Production::Return => "S -> return E",
            Production::AddExpr => "E -> E + A",
            Production::SubExpr => "E -> E - A",
            Production::ExprFromTerm => "E -> A",
            Production::MulTerm => "A -> A * B",
            Production::TermFromFactor => "A -> B",
            Production::Parenthesized => "B -> ( E )",
            Production::FactorFromId => "B -> id",
            Production::FactorFromConst => "B -> IntConst",
        };
        write!(f, "{}", rule)
    }
}
