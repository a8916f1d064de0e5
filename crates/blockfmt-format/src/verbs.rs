//! Reversible escaping of Go fmt verbs inside HCL blocks.
//!
//! Provider acceptance tests build configurations with `fmt.Sprintf`, so the
//! blocks are full of verbs (`%s`, `%d`, `%[2]q`, ...) that `terraform fmt`
//! rejects. [`escape`] rewrites each supported verb shape into a marker that
//! is valid HCL (a comment, a quoted string or an identifier) and
//! [`unescape`] turns the markers back into the original verbs.
//!
//! The rules run as an ordered table: later rules rely on earlier ones
//! having consumed their shapes, and [`unescape`] walks the table backwards.
//! For any text built from the supported shapes,
//! `unescape(&escape(text)) == text`.
//!
//! Verbs inside ordinary quoted strings (`"%s.example.com"`,
//! `"${%s.name}"`) are left alone. Shapes not covered here, such as a verb
//! standing in for a resource type, are not supported and surface as
//! formatter errors.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// One reversible substitution in the escaping table.
pub struct Rule {
    /// Short identifier used in logs and tests.
    pub name: &'static str,
    escape: fn(&str) -> String,
    unescape: fn(&str) -> String,
}

impl Rule {
    /// Apply this rule's forward substitution.
    pub fn escape(&self, text: &str) -> String {
        (self.escape)(text)
    }

    /// Apply this rule's inverse substitution.
    pub fn unescape(&self, text: &str) -> String {
        (self.unescape)(text)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// The escaping rules in application order.
pub static RULES: &[Rule] = &[
    Rule {
        name: "conditional",
        escape: escape_conditional,
        unescape: unescape_conditional,
    },
    Rule {
        name: "declaration-name",
        escape: escape_declaration_name,
        unescape: unescape_declaration_name,
    },
    Rule {
        name: "provider",
        escape: escape_provider,
        unescape: unescape_provider,
    },
    Rule {
        name: "count",
        escape: escape_count,
        unescape: unescape_count,
    },
    Rule {
        name: "bare-line",
        escape: escape_bare_line,
        unescape: unescape_bare_line,
    },
    Rule {
        name: "key",
        escape: escape_key,
        unescape: unescape_key,
    },
    Rule {
        name: "interpolated-index",
        escape: escape_interpolated_index,
        unescape: unescape_interpolated_index,
    },
    Rule {
        name: "list",
        escape: escape_list,
        unescape: unescape_list,
    },
    Rule {
        name: "traversal",
        escape: escape_traversal,
        unescape: unescape_traversal,
    },
    Rule {
        name: "assigned",
        escape: escape_assigned,
        unescape: unescape_assigned,
    },
    Rule {
        name: "function-argument",
        escape: escape_function_argument,
        unescape: unescape_function_argument,
    },
];

/// Disguise every supported fmt verb in `text` as valid HCL.
pub fn escape(text: &str) -> String {
    RULES
        .iter()
        .fold(text.to_string(), |acc, rule| rule.escape(&acc))
}

/// Restore the fmt verbs disguised by [`escape`].
pub fn unescape(text: &str) -> String {
    RULES
        .iter()
        .rev()
        .fold(text.to_string(), |acc, rule| rule.unescape(&acc))
}

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid verb pattern regex")
}

/// Render a verb, positional when `index` is non-empty: `%s` or `%[2]s`.
fn verb(index: &str, letter: &str) -> String {
    if index.is_empty() {
        format!("%{letter}")
    } else {
        format!("%[{index}]{letter}")
    }
}

fn group<'t>(caps: &Captures<'t>, i: usize) -> &'t str {
    caps.get(i).map_or("", |m| m.as_str())
}

// conditional: `= %[2]t ? a : b` -> `= true/*@@_@@ TFMT:%[2]t:TFMT @@_@@*/ ? a : b`

static CONDITIONAL: LazyLock<Regex> = LazyLock::new(|| regex(r"(=\s*)(%(?:\[\d+\])?t)(\s\?)"));
static CONDITIONAL_MARKER: LazyLock<Regex> =
    LazyLock::new(|| regex(r"true\s*/\*@@_@@ TFMT:(%[^\n]*?):TFMT @@_@@\*/"));

fn escape_conditional(text: &str) -> String {
    CONDITIONAL
        .replace_all(text, "${1}true/*@@_@@ TFMT:${2}:TFMT @@_@@*/${3}")
        .into_owned()
}

fn unescape_conditional(text: &str) -> String {
    CONDITIONAL_MARKER.replace_all(text, "${1}").into_owned()
}

// declaration names: `resource "t" "test-%[1]s" {` -> `"test-TFMTRESNAME_1s"`,
// `data "t" %q {` -> `"TFMTRESNAME_q"`

static DECLARATION_NAME: LazyLock<Regex> = LazyLock::new(|| {
    regex(
        r#"(?m)^([ \t]*(?:(?:resource|data)[ \t]+"[^"\n]*"|variable|output)[ \t]+)("[^"\n]*"|%(?:\[(\d+)\])?q)([ \t]*\{)"#,
    )
});
static NAME_VERB: LazyLock<Regex> = LazyLock::new(|| regex(r"%(?:\[(\d+)\])?([sdfgtq])"));
static QUOTED_NAME_MARKER: LazyLock<Regex> = LazyLock::new(|| regex(r#""TFMTRESNAME_(\d*)q""#));
static NAME_MARKER: LazyLock<Regex> = LazyLock::new(|| regex(r"TFMTRESNAME_(\d*)([sdfgtq])"));

fn escape_declaration_name(text: &str) -> String {
    DECLARATION_NAME
        .replace_all(text, |caps: &Captures| {
            let name = &caps[2];
            let name = if name.starts_with('"') {
                NAME_VERB
                    .replace_all(name, |v: &Captures| {
                        format!("TFMTRESNAME_{}{}", group(v, 1), &v[2])
                    })
                    .into_owned()
            } else {
                format!("\"TFMTRESNAME_{}q\"", group(caps, 3))
            };
            format!("{}{}{}", &caps[1], name, &caps[4])
        })
        .into_owned()
}

fn unescape_declaration_name(text: &str) -> String {
    let text = QUOTED_NAME_MARKER.replace_all(text, |caps: &Captures| verb(&caps[1], "q"));
    NAME_MARKER
        .replace_all(&text, |caps: &Captures| verb(&caps[1], &caps[2]))
        .into_owned()
}

// meta-arguments: `provider = %s` -> `provider = tfmtprovider.PROVIDER`,
// `count = %[2]d` -> `count = var.tfmtcount_2`

static PROVIDER: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?m)^([ \t]*provider[ \t]*=[ \t]*)%(?:\[(\d+)\])?s$"));
static PROVIDER_MARKER: LazyLock<Regex> =
    LazyLock::new(|| regex(r"tfmtprovider\.PROVIDER(?:_(\d+))?"));
static COUNT: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?m)^([ \t]*count[ \t]*=[ \t]*)%(?:\[(\d+)\])?d$"));
static COUNT_MARKER: LazyLock<Regex> = LazyLock::new(|| regex(r"var\.tfmtcount(?:_(\d+))?"));

fn suffix(index: &str) -> String {
    if index.is_empty() {
        String::new()
    } else {
        format!("_{index}")
    }
}

fn escape_provider(text: &str) -> String {
    PROVIDER
        .replace_all(text, |caps: &Captures| {
            format!("{}tfmtprovider.PROVIDER{}", &caps[1], suffix(group(caps, 2)))
        })
        .into_owned()
}

fn unescape_provider(text: &str) -> String {
    PROVIDER_MARKER
        .replace_all(text, |caps: &Captures| verb(group(caps, 1), "s"))
        .into_owned()
}

fn escape_count(text: &str) -> String {
    COUNT
        .replace_all(text, |caps: &Captures| {
            format!("{}var.tfmtcount{}", &caps[1], suffix(group(caps, 2)))
        })
        .into_owned()
}

fn unescape_count(text: &str) -> String {
    COUNT_MARKER
        .replace_all(text, |caps: &Captures| verb(group(caps, 1), "d"))
        .into_owned()
}

// bare line: `    %s` -> `#@@_@@ TFMT:    %s:TMFT @@_@@#`

static BARE_LINE: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?m)^[ \t]*%(?:\.[0-9])?(?:\[\d+\])?[sdfgtq]$"));
static BARE_LINE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?m)^[ \t]*#@@_@@ TFMT:([^\n]*?):TMFT @@_@@#"));

fn escape_bare_line(text: &str) -> String {
    BARE_LINE
        .replace_all(text, "#@@_@@ TFMT:${0}:TMFT @@_@@#")
        .into_owned()
}

fn unescape_bare_line(text: &str) -> String {
    BARE_LINE_MARKER.replace_all(text, "${1}").into_owned()
}

// key: `  %[1]q = value` -> `  Ω_1_q = value`

static KEY: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?m)^([ \t]*)%(?:\[(\d+)\])?([sdfgtq])([ \t]*=)"));
static KEY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?m)^([ \t]*)Ω(?:_(\d+)_)?([sdfgtq])"));

fn escape_key(text: &str) -> String {
    KEY.replace_all(text, |caps: &Captures| {
        let marker = match group(caps, 2) {
            "" => format!("Ω{}", &caps[3]),
            index => format!("Ω_{index}_{}", &caps[3]),
        };
        format!("{}{}{}", &caps[1], marker, &caps[4])
    })
    .into_owned()
}

fn unescape_key(text: &str) -> String {
    KEY_MARKER
        .replace_all(text, |caps: &Captures| {
            format!("{}{}", &caps[1], verb(group(caps, 2), &caps[3]))
        })
        .into_owned()
}

// interpolated index: `"${a.*.arn[%d]}"` -> `"${a.*.arn[0/*@@_@@ TFMT:%d:TFMT @@_@@*/]}"`

static INTERPOLATED_INDEX: LazyLock<Regex> =
    LazyLock::new(|| regex(r#"(?m)("\$\{.*\[)(%(?:\.[0-9])?(?:\[\d+\])?d)(\]\}")$"#));
static INTERPOLATED_INDEX_MARKER: LazyLock<Regex> =
    LazyLock::new(|| regex(r"0\s*/\*@@_@@ TFMT:(%[^\n]*?):TFMT @@_@@\*/"));

fn escape_interpolated_index(text: &str) -> String {
    INTERPOLATED_INDEX
        .replace_all(text, "${1}0/*@@_@@ TFMT:${2}:TFMT @@_@@*/${3}")
        .into_owned()
}

fn unescape_interpolated_index(text: &str) -> String {
    INTERPOLATED_INDEX_MARKER.replace_all(text, "${1}").into_owned()
}

// list or index of verbs: `[%s, %[2]d]` -> `["@@_@@ TFMT:[%s, %[2]d]:TFMT @@_@@"]`

static LIST: LazyLock<Regex> =
    LazyLock::new(|| regex(r"\[(?:%(?:\.[0-9])?(?:\[\d+\])?[sdfgtq](?:,\s*)?)+\]"));
static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| regex(r#"\["@@_@@ TFMT:(\[[^"]*?\]):TFMT @@_@@"\]"#));

fn escape_list(text: &str) -> String {
    LIST.replace_all(text, r#"["@@_@@ TFMT:${0}:TFMT @@_@@"]"#)
        .into_owned()
}

fn unescape_list(text: &str) -> String {
    LIST_MARKER.replace_all(text, "${1}").into_owned()
}

// traversal segment: `data.x.%s.id` -> `data.x.TFMTKTKTTFMTs.id`,
// `resource.test-%[1]s.id` -> `resource.test-TFMTKTKTTFMT_1s.id`

static DOT_SEGMENT: LazyLock<Regex> = LazyLock::new(|| regex(r"\.%(?:\[(\d+)\])?([sdfgtq])"));
static DASH_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(\.[A-Za-z0-9_]+)-%(?:\[(\d+)\])?([sdfgtq])"));
static SEGMENT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| regex(r"TFMTKTKTTFMT(?:_(\d+))?([sdfgtq])"));

fn escape_traversal(text: &str) -> String {
    let text = DOT_SEGMENT.replace_all(text, |caps: &Captures| {
        format!(".TFMTKTKTTFMT{}{}", suffix(group(caps, 1)), &caps[2])
    });
    DASH_SEGMENT
        .replace_all(&text, |caps: &Captures| {
            format!(
                "{}-TFMTKTKTTFMT{}{}",
                &caps[1],
                suffix(group(caps, 2)),
                &caps[3]
            )
        })
        .into_owned()
}

fn unescape_traversal(text: &str) -> String {
    SEGMENT_MARKER
        .replace_all(text, |caps: &Captures| verb(group(caps, 1), &caps[2]))
        .into_owned()
}

// assigned value at end of line: `= %s.id` -> `= "@@_@@ TFMT:%s.id:TFMT @@_@@"`

static ASSIGNED: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(?m)%(?:\.[0-9])?(?:\[\d+\])?[sdfgtq](?:\.[a-z_]+)*$"));
static ASSIGNED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| regex(r#""@@_@@ TFMT:(%[^\n]*?):TFMT @@_@@""#));

fn escape_assigned(text: &str) -> String {
    ASSIGNED
        .replace_all(text, r#""@@_@@ TFMT:${0}:TFMT @@_@@""#)
        .into_owned()
}

fn unescape_assigned(text: &str) -> String {
    ASSIGNED_MARKER.replace_all(text, "${1}").into_owned()
}

// function argument: `md5(%s)`, `range(1, %[2]d+1)` -> `md5(TFMTFNPARAM_s)`, `range(1, TFMTFNPARAM_2d+1)`

static FUNCTION_ARGUMENT: LazyLock<Regex> =
    LazyLock::new(|| regex(r"(\([^()\n]*?,\s*|\(\s*)%(?:\[(\d+)\])?([sdfgtq])"));
static FUNCTION_ARGUMENT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| regex(r"TFMTFNPARAM_(\d*)([sdfgtq])"));

fn escape_function_argument(text: &str) -> String {
    // Matches cannot overlap, so `f(%s, %s)` needs one pass per argument.
    let mut current = text.to_string();
    loop {
        let next = FUNCTION_ARGUMENT
            .replace_all(&current, |caps: &Captures| {
                format!("{}TFMTFNPARAM_{}{}", &caps[1], group(caps, 2), &caps[3])
            })
            .into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

fn unescape_function_argument(text: &str) -> String {
    FUNCTION_ARGUMENT_MARKER
        .replace_all(text, |caps: &Captures| verb(&caps[1], &caps[2]))
        .into_owned()
}
