use litdoc_engine::NodeKind;

/// Map a tree-sitter-javascript node kind onto the engine's closed set.
///
/// JSX and anything newer than the grammar the mapping was written against
/// come back as [`NodeKind::Unrecognized`].
pub fn node_kind(kind: &str) -> NodeKind {
    match kind {
        "program" => NodeKind::Program,

        "expression_statement" => NodeKind::ExpressionStatement,
        "variable_declaration" => NodeKind::VariableDeclaration,
        "lexical_declaration" => NodeKind::LexicalDeclaration,
        "variable_declarator" => NodeKind::VariableDeclarator,
        "statement_block" => NodeKind::StatementBlock,
        "if_statement" => NodeKind::IfStatement,
        "else_clause" => NodeKind::ElseClause,
        "switch_statement" => NodeKind::SwitchStatement,
        "switch_body" => NodeKind::SwitchBody,
        "switch_case" => NodeKind::SwitchCase,
        "switch_default" => NodeKind::SwitchDefault,
        "for_statement" => NodeKind::ForStatement,
        "for_in_statement" => NodeKind::ForInStatement,
        "while_statement" => NodeKind::WhileStatement,
        "do_statement" => NodeKind::DoStatement,
        "try_statement" => NodeKind::TryStatement,
        "catch_clause" => NodeKind::CatchClause,
        "finally_clause" => NodeKind::FinallyClause,
        "with_statement" => NodeKind::WithStatement,
        "break_statement" => NodeKind::BreakStatement,
        "continue_statement" => NodeKind::ContinueStatement,
        "return_statement" => NodeKind::ReturnStatement,
        "throw_statement" => NodeKind::ThrowStatement,
        "labeled_statement" => NodeKind::LabeledStatement,
        "empty_statement" => NodeKind::EmptyStatement,
        "debugger_statement" => NodeKind::DebuggerStatement,

        "import_statement" => NodeKind::ImportStatement,
        "import_clause" => NodeKind::ImportClause,
        "named_imports" => NodeKind::NamedImports,
        "namespace_import" => NodeKind::NamespaceImport,
        "import_specifier" => NodeKind::ImportSpecifier,
        "import_attribute" => NodeKind::ImportAttribute,
        "export_statement" => NodeKind::ExportStatement,
        "export_clause" => NodeKind::ExportClause,
        "export_specifier" => NodeKind::ExportSpecifier,
        "namespace_export" => NodeKind::NamespaceExport,
        "nested_identifier" => NodeKind::NestedIdentifier,

        "function_declaration" => NodeKind::FunctionDeclaration,
        "generator_function_declaration" => NodeKind::GeneratorFunctionDeclaration,
        "class_declaration" => NodeKind::ClassDeclaration,
        "class" => NodeKind::Class,
        "class_heritage" => NodeKind::ClassHeritage,
        "class_body" => NodeKind::ClassBody,
        "method_definition" => NodeKind::MethodDefinition,
        "field_definition" => NodeKind::FieldDefinition,
        "class_static_block" => NodeKind::ClassStaticBlock,
        "formal_parameters" => NodeKind::FormalParameters,
        "decorator" => NodeKind::Decorator,

        "arguments" => NodeKind::Arguments,
        "parenthesized_expression" => NodeKind::ParenthesizedExpression,
        "assignment_expression" => NodeKind::AssignmentExpression,
        "augmented_assignment_expression" => NodeKind::AugmentedAssignmentExpression,
        "await_expression" => NodeKind::AwaitExpression,
        "unary_expression" => NodeKind::UnaryExpression,
        "binary_expression" => NodeKind::BinaryExpression,
        "ternary_expression" => NodeKind::TernaryExpression,
        "update_expression" => NodeKind::UpdateExpression,
        "new_expression" => NodeKind::NewExpression,
        "yield_expression" => NodeKind::YieldExpression,
        "call_expression" => NodeKind::CallExpression,
        "member_expression" => NodeKind::MemberExpression,
        "subscript_expression" => NodeKind::SubscriptExpression,
        "sequence_expression" => NodeKind::SequenceExpression,
        "arrow_function" => NodeKind::ArrowFunction,
        // older grammars call function expressions plain `function`
        "function_expression" | "function" => NodeKind::FunctionExpression,
        "generator_function" => NodeKind::GeneratorFunction,
        "object" => NodeKind::Object,
        "array" => NodeKind::Array,
        "pair" => NodeKind::Pair,
        "spread_element" => NodeKind::SpreadElement,
        "computed_property_name" => NodeKind::ComputedPropertyName,
        "template_string" => NodeKind::TemplateString,
        "template_substitution" => NodeKind::TemplateSubstitution,

        "object_pattern" => NodeKind::ObjectPattern,
        "array_pattern" => NodeKind::ArrayPattern,
        "pair_pattern" => NodeKind::PairPattern,
        "assignment_pattern" => NodeKind::AssignmentPattern,
        "object_assignment_pattern" => NodeKind::ObjectAssignmentPattern,
        "rest_pattern" => NodeKind::RestPattern,

        "identifier" => NodeKind::Identifier,
        "property_identifier" => NodeKind::PropertyIdentifier,
        "shorthand_property_identifier" => NodeKind::ShorthandPropertyIdentifier,
        "shorthand_property_identifier_pattern" => NodeKind::ShorthandPropertyIdentifierPattern,
        "private_property_identifier" => NodeKind::PrivatePropertyIdentifier,
        "statement_identifier" => NodeKind::StatementIdentifier,
        "number" => NodeKind::Number,
        "string" => NodeKind::String,
        "string_fragment" => NodeKind::StringFragment,
        "escape_sequence" => NodeKind::EscapeSequence,
        "regex" => NodeKind::Regex,
        "this" => NodeKind::This,
        "super" => NodeKind::Super,
        "true" => NodeKind::True,
        "false" => NodeKind::False,
        "null" => NodeKind::Null,
        "undefined" => NodeKind::Undefined,
        "meta_property" => NodeKind::MetaProperty,
        "optional_chain" => NodeKind::OptionalChain,
        "import" => NodeKind::Import,
        "hash_bang_line" => NodeKind::HashBangLine,
        "html_comment" => NodeKind::HtmlComment,

        other => NodeKind::Unrecognized(other.to_string()),
    }
}
