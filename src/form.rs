//! HTML form rendering for a collection schema

use serde_json::{Map, Value};

use crate::config::FormConfig;
use crate::schema::{CollectionSchema, FieldDescriptor, FieldType, SchemaError};

/// Body served in place of a form when the schema carries no field list.
pub const INVALID_SCHEMA_MESSAGE: &str = "無効なスキーマ";

const INPUT_CLASS: &str = "mt-1 p-2 w-full border rounded-md";
const CHECKBOX_CLASS: &str = "mt-1";

/// How a schema field is presented in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Widget {
    pub input_type: &'static str,
    pub class: &'static str,
    pub required: bool,
}

impl Widget {
    pub fn for_type(field_type: &FieldType) -> Self {
        match field_type {
            FieldType::Text => Widget { input_type: "text", class: INPUT_CLASS, required: true },
            FieldType::Email => Widget { input_type: "email", class: INPUT_CLASS, required: true },
            FieldType::Number => Widget { input_type: "number", class: INPUT_CLASS, required: false },
            FieldType::Bool => Widget { input_type: "checkbox", class: CHECKBOX_CLASS, required: false },
            FieldType::Other(_) => Widget { input_type: "text", class: INPUT_CLASS, required: false },
        }
    }
}

/// Render the raw backend schema object.
///
/// A schema without a `fields` array yields [`INVALID_SCHEMA_MESSAGE`] instead of a
/// document; a malformed field descriptor is returned as an error.
pub fn render_schema_object(
    schema: &Map<String, Value>,
    options: &FormConfig,
) -> Result<String, SchemaError> {
    match CollectionSchema::from_object(schema) {
        Ok(schema) => Ok(render_form(&schema, options)),
        Err(SchemaError::MissingFields) => {
            tracing::warn!("schema has no fields array; serving invalid-schema notice");
            Ok(INVALID_SCHEMA_MESSAGE.to_string())
        }
        Err(err) => Err(err),
    }
}

/// Render a complete HTML document with one input per non-excluded field, in schema order.
pub fn render_form(schema: &CollectionSchema, options: &FormConfig) -> String {
    let mut html = String::new();
    html.push_str(&document_head(&options.title));

    for field in schema.fields.iter().filter(|f| !options.is_excluded(&f.name)) {
        html.push_str(&render_field(field));
    }

    html.push_str(DOCUMENT_TAIL);
    html
}

fn render_field(field: &FieldDescriptor) -> String {
    let name = escape_attr(&field.name);
    let widget = Widget::for_type(&field.field_type);
    let required = if widget.required { " required" } else { "" };

    format!(
        "\n\t\t\t<div>\n\t\t\t\t<label for=\"{name}\" class=\"block text-sm font-medium text-gray-700\">{name}:</label>\
         \n\t\t\t\t<input type=\"{input_type}\" id=\"{name}\" name=\"{name}\" class=\"{class}\"{required}></div>",
        input_type = widget.input_type,
        class = widget.class,
    )
}

fn document_head(title: &str) -> String {
    format!(
        "\n\t<!DOCTYPE html>\n\t<html lang=\"ja\">\n\t<head>\n\t\t<meta charset=\"UTF-8\">\
         \n\t\t<title>PocketBase Form</title>\
         \n\t\t<script src=\"https://cdn.tailwindcss.com\"></script>\n\t</head>\
         \n\t<body class=\"bg-gray-100 p-8\">\
         \n\t\t<div class=\"max-w-xl mx-auto bg-white p-6 rounded-lg shadow-lg\">\
         \n\t\t\t<h1 class=\"text-2xl font-bold mb-6\">{}</h1>\
         \n\t\t\t<form method=\"POST\" action=\"/submit\" class=\"space-y-4\">\n\t",
        escape_text(title)
    )
}

const DOCUMENT_TAIL: &str = "\n\t\t\t\t<button type=\"submit\" class=\"w-full bg-blue-500 text-white p-2 rounded-md hover:bg-blue-600\">送信</button>\
\n\t\t\t</form>\n\t\t</div>\n\t</body>\n\t</html>";

fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(raw: &str) -> String {
    escape_text(raw).replace('"', "&quot;").replace('\'', "&#39;")
}
