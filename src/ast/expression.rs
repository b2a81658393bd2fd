use super::{
    Assignment, BooleanLit, Call, DecimalLit, DictionaryLit, FunctionComposition, FunctionLit,
    FunctionThread, Identifier, IfExpr, Index, Infix, IntegerLit, Let, ListLit, MutableLet,
    NilLit, Prefix, SetLit, StringLit,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Integer(IntegerLit),
    Decimal(DecimalLit),
    Str(StringLit),
    Boolean(BooleanLit),
    Nil(NilLit),
    Identifier(Identifier),
    Let(Let),
    MutableLet(MutableLet),
    Assignment(Assignment),
    Infix(Infix),
    Prefix(Prefix),
    Call(Call),
    Index(Index),
    List(ListLit),
    Set(SetLit),
    Dictionary(DictionaryLit),
    Function(FunctionLit),
    If(IfExpr),
    Composition(FunctionComposition),
    Thread(FunctionThread),
}
