//! The syntax tree handed to the engine by a parser front end.
//!
//! The engine never parses source itself. A [`SourceParser`] turns text into a
//! [`SyntaxNode`] tree in which every node may carry the comments that lead or
//! trail it, with their positions in the original text.

use crate::error::ParseError;

/// A point in the original source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 0-based byte offset into the line.
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Start and end of a construct. The end column is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

impl Location {
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start: Position::new(start_line, start_column),
            end: Position::new(end_line, end_column),
        }
    }

    /// Whether start and end fall on the same line.
    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }
}

/// A comment as the parser saw it.
///
/// `text` is the comment body without its delimiters: `// note` carries
/// `" note"`, `/** doc */` carries `"* doc "`. The location spans the whole
/// comment including delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawComment {
    pub text: String,
    pub location: Location,
}

impl RawComment {
    pub fn new(text: impl Into<String>, location: Location) -> Self {
        Self {
            text: text.into(),
            location,
        }
    }
}

/// The syntactic constructs the tree walker understands.
///
/// Leaf kinds never contain comments worth extracting and are not recursed
/// into. Anything a front end cannot map lands in [`NodeKind::Unrecognized`],
/// which the walker refuses to skip.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,

    // Statements
    ExpressionStatement,
    VariableDeclaration,
    LexicalDeclaration,
    VariableDeclarator,
    StatementBlock,
    IfStatement,
    ElseClause,
    SwitchStatement,
    SwitchBody,
    SwitchCase,
    SwitchDefault,
    ForStatement,
    ForInStatement,
    WhileStatement,
    DoStatement,
    TryStatement,
    CatchClause,
    FinallyClause,
    WithStatement,
    BreakStatement,
    ContinueStatement,
    ReturnStatement,
    ThrowStatement,
    LabeledStatement,
    EmptyStatement,
    DebuggerStatement,

    // Modules
    ImportStatement,
    ImportClause,
    NamedImports,
    NamespaceImport,
    ImportSpecifier,
    ImportAttribute,
    ExportStatement,
    ExportClause,
    ExportSpecifier,
    NamespaceExport,
    NestedIdentifier,

    // Declarations and classes
    FunctionDeclaration,
    GeneratorFunctionDeclaration,
    ClassDeclaration,
    Class,
    ClassHeritage,
    ClassBody,
    MethodDefinition,
    FieldDefinition,
    ClassStaticBlock,
    FormalParameters,
    Decorator,

    // Expressions
    Arguments,
    ParenthesizedExpression,
    AssignmentExpression,
    AugmentedAssignmentExpression,
    AwaitExpression,
    UnaryExpression,
    BinaryExpression,
    TernaryExpression,
    UpdateExpression,
    NewExpression,
    YieldExpression,
    CallExpression,
    MemberExpression,
    SubscriptExpression,
    SequenceExpression,
    ArrowFunction,
    FunctionExpression,
    GeneratorFunction,
    Object,
    Array,
    Pair,
    SpreadElement,
    ComputedPropertyName,
    TemplateString,
    TemplateSubstitution,

    // Patterns
    ObjectPattern,
    ArrayPattern,
    PairPattern,
    AssignmentPattern,
    ObjectAssignmentPattern,
    RestPattern,

    // Leaves
    Identifier,
    PropertyIdentifier,
    ShorthandPropertyIdentifier,
    ShorthandPropertyIdentifierPattern,
    PrivatePropertyIdentifier,
    StatementIdentifier,
    Number,
    String,
    StringFragment,
    EscapeSequence,
    Regex,
    This,
    Super,
    True,
    False,
    Null,
    Undefined,
    MetaProperty,
    OptionalChain,
    Import,
    HashBangLine,
    HtmlComment,

    /// A construct the front end produced but the walker has no rule for.
    Unrecognized(std::string::String),
}

impl NodeKind {
    /// Whether the walker stops at this node instead of visiting children.
    ///
    /// `Unrecognized` is reported as a leaf here; the walker rejects it
    /// before this question matters.
    pub fn is_leaf(&self) -> bool {
        match self {
            NodeKind::Identifier
            | NodeKind::PropertyIdentifier
            | NodeKind::ShorthandPropertyIdentifier
            | NodeKind::ShorthandPropertyIdentifierPattern
            | NodeKind::PrivatePropertyIdentifier
            | NodeKind::StatementIdentifier
            | NodeKind::Number
            | NodeKind::String
            | NodeKind::StringFragment
            | NodeKind::EscapeSequence
            | NodeKind::Regex
            | NodeKind::This
            | NodeKind::Super
            | NodeKind::True
            | NodeKind::False
            | NodeKind::Null
            | NodeKind::Undefined
            | NodeKind::OptionalChain
            | NodeKind::Import
            | NodeKind::HashBangLine
            | NodeKind::HtmlComment
            | NodeKind::EmptyStatement
            | NodeKind::Unrecognized(_) => true,

            NodeKind::Program
            | NodeKind::ExpressionStatement
            | NodeKind::VariableDeclaration
            | NodeKind::LexicalDeclaration
            | NodeKind::VariableDeclarator
            | NodeKind::StatementBlock
            | NodeKind::IfStatement
            | NodeKind::ElseClause
            | NodeKind::SwitchStatement
            | NodeKind::SwitchBody
            | NodeKind::SwitchCase
            | NodeKind::SwitchDefault
            | NodeKind::ForStatement
            | NodeKind::ForInStatement
            | NodeKind::WhileStatement
            | NodeKind::DoStatement
            | NodeKind::TryStatement
            | NodeKind::CatchClause
            | NodeKind::FinallyClause
            | NodeKind::WithStatement
            | NodeKind::BreakStatement
            | NodeKind::ContinueStatement
            | NodeKind::ReturnStatement
            | NodeKind::ThrowStatement
            | NodeKind::LabeledStatement
            | NodeKind::DebuggerStatement
            | NodeKind::ImportStatement
            | NodeKind::ImportClause
            | NodeKind::NamedImports
            | NodeKind::NamespaceImport
            | NodeKind::ImportSpecifier
            | NodeKind::ImportAttribute
            | NodeKind::ExportStatement
            | NodeKind::ExportClause
            | NodeKind::ExportSpecifier
            | NodeKind::NamespaceExport
            | NodeKind::NestedIdentifier
            | NodeKind::FunctionDeclaration
            | NodeKind::GeneratorFunctionDeclaration
            | NodeKind::ClassDeclaration
            | NodeKind::Class
            | NodeKind::ClassHeritage
            | NodeKind::ClassBody
            | NodeKind::MethodDefinition
            | NodeKind::FieldDefinition
            | NodeKind::ClassStaticBlock
            | NodeKind::FormalParameters
            | NodeKind::Decorator
            | NodeKind::Arguments
            | NodeKind::ParenthesizedExpression
            | NodeKind::AssignmentExpression
            | NodeKind::AugmentedAssignmentExpression
            | NodeKind::AwaitExpression
            | NodeKind::UnaryExpression
            | NodeKind::BinaryExpression
            | NodeKind::TernaryExpression
            | NodeKind::UpdateExpression
            | NodeKind::NewExpression
            | NodeKind::YieldExpression
            | NodeKind::CallExpression
            | NodeKind::MemberExpression
            | NodeKind::SubscriptExpression
            | NodeKind::SequenceExpression
            | NodeKind::ArrowFunction
            | NodeKind::FunctionExpression
            | NodeKind::GeneratorFunction
            | NodeKind::Object
            | NodeKind::Array
            | NodeKind::Pair
            | NodeKind::SpreadElement
            | NodeKind::ComputedPropertyName
            | NodeKind::TemplateString
            | NodeKind::TemplateSubstitution
            | NodeKind::MetaProperty
            | NodeKind::ObjectPattern
            | NodeKind::ArrayPattern
            | NodeKind::PairPattern
            | NodeKind::AssignmentPattern
            | NodeKind::ObjectAssignmentPattern
            | NodeKind::RestPattern => false,
        }
    }
}

/// One node of the syntax tree with its attached comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub location: Location,
    /// Comments before this node, in source order.
    pub leading_comments: Vec<RawComment>,
    /// Comments after this node, in source order.
    pub trailing_comments: Vec<RawComment>,
    /// Child nodes, in source order.
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, location: Location) -> Self {
        Self {
            kind,
            location,
            leading_comments: Vec::new(),
            trailing_comments: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_leading(mut self, comments: Vec<RawComment>) -> Self {
        self.leading_comments = comments;
        self
    }

    pub fn with_trailing(mut self, comments: Vec<RawComment>) -> Self {
        self.trailing_comments = comments;
        self
    }
}

/// A parser front end for one source language.
pub trait SourceParser {
    /// Language identifier passed on to the highlighter (e.g. `"javascript"`).
    fn language(&self) -> &str;

    /// Parse `text` into a comment-annotated tree.
    fn parse(&self, text: &str) -> Result<SyntaxNode, ParseError>;
}
