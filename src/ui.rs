//! Declarative form definitions and page rendering.
//!
//! Each binary's twelve input widgets are described as data and rendered
//! into one self-contained HTML page. Bounds, steps, defaults and label
//! texts are part of the UI contract each binary ships with; the two forms
//! disagree on several bounds and each keeps its own.

use std::fmt::Write as _;

/// One input widget of the form
pub struct FieldSpec {
    /// JSON key submitted to the prediction endpoint
    pub name: &'static str,
    /// Human-readable label shown next to the widget
    pub label: &'static str,
    pub widget: Widget,
}

/// Widget kind with its UI contract
pub enum Widget {
    Slider {
        min: f64,
        max: f64,
        step: f64,
        default: f64,
    },
    Radio {
        options: [&'static str; 2],
        default: &'static str,
        /// Whether the submitted value is a JSON number or a string
        numeric: bool,
    },
}

/// A full page: title, description, fields and the output box
pub struct PageSpec {
    pub title: &'static str,
    pub description: &'static str,
    /// Label on the read-only output box
    pub output_label: &'static str,
    /// JSON field of the prediction response shown in the output box
    pub output_field: &'static str,
    pub fields: Vec<FieldSpec>,
}

/// Form served by `survival-ui`: categorical answers, clinical bounds
pub fn survival_page() -> PageSpec {
    PageSpec {
        title: "Patient Survival Prediction",
        description: "Predict survival of patient with heart failure, given their clinical record",
        output_label: "Survive",
        output_field: "survive",
        fields: vec![
            slider("age", "Age (years)", 40.0, 100.0, 1.0, 55.0),
            yes_no("anaemia", "Decrease of red blood cells or hemoglobin", "Yes"),
            slider(
                "creatinine_phosphokinase",
                "Level of the CPK enzyme in the blood (mcg/L)",
                23.0,
                1281.0,
                0.25,
                1280.25,
            ),
            yes_no("diabetes", "Has diabetes", "No"),
            slider(
                "ejection_fraction",
                "Percentage of blood leaving the heart at each contraction (%)",
                14.0,
                100.0,
                1.0,
                38.0,
            ),
            yes_no(
                "high_blood_pressure",
                "Has hypertension/high blood pressure",
                "No",
            ),
            slider(
                "platelets",
                "Platelets in the blood (kiloplatelets/mL)",
                76000.0,
                440000.0,
                1.0,
                263358.03,
            ),
            slider(
                "serum_creatinine",
                "Level of serum creatinine in the blood (mg/dL)",
                0.5,
                2.15,
                0.01,
                1.1,
            ),
            slider(
                "serum_sodium",
                "Level of serum sodium in the blood (mEq/L)",
                125.0,
                148.0,
                1.0,
                136.0,
            ),
            FieldSpec {
                name: "sex",
                label: "Gender",
                widget: Widget::Radio {
                    options: ["M", "F"],
                    default: "M",
                    numeric: false,
                },
            },
            yes_no("smoking", "Smokes?", "No"),
            slider("time", "Follow-up period (days)", 4.0, 285.0, 1.0, 6.0),
        ],
    }
}

/// Form served by `death-event-ui`: numeric-coded answers, wider bounds
pub fn death_event_page() -> PageSpec {
    PageSpec {
        title: "Heart Failure Death Event Prediction",
        description: "Predict the death event for a patient with heart failure from their clinical record",
        output_label: "Death Event",
        output_field: "prediction",
        fields: vec![
            slider("age", "Age (years)", 0.0, 120.0, 1.0, 55.0),
            coded("anaemia", "Decrease of red blood cells or hemoglobin (1 = yes, 0 = no)"),
            slider(
                "creatinine_phosphokinase",
                "Level of the CPK enzyme in the blood",
                0.0,
                10.0,
                0.1,
                1.1,
            ),
            coded("diabetes", "Has diabetes (1 = yes, 0 = no)"),
            slider(
                "ejection_fraction",
                "Percentage of blood leaving the heart at each contraction (%)",
                10.0,
                80.0,
                1.0,
                38.0,
            ),
            coded(
                "high_blood_pressure",
                "Has hypertension/high blood pressure (1 = yes, 0 = no)",
            ),
            slider(
                "platelets",
                "Platelets in the blood",
                0.0,
                850000.0,
                1.0,
                263358.03,
            ),
            slider(
                "serum_creatinine",
                "Level of serum creatinine in the blood (mg/dL)",
                0.0,
                10.0,
                0.01,
                1.1,
            ),
            slider(
                "serum_sodium",
                "Level of serum sodium in the blood (mEq/L)",
                100.0,
                150.0,
                1.0,
                136.0,
            ),
            coded("sex", "Sex (1 = male, 0 = female)"),
            coded("smoking", "Smokes? (1 = yes, 0 = no)"),
            slider("time", "Follow-up period (days)", 0.0, 300.0, 1.0, 6.0),
        ],
    }
}

fn slider(
    name: &'static str,
    label: &'static str,
    min: f64,
    max: f64,
    step: f64,
    default: f64,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        widget: Widget::Slider {
            min,
            max,
            step,
            default,
        },
    }
}

fn yes_no(name: &'static str, label: &'static str, default: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        widget: Widget::Radio {
            options: ["Yes", "No"],
            default,
            numeric: false,
        },
    }
}

fn coded(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        widget: Widget::Radio {
            options: ["1", "0"],
            default: "0",
            numeric: true,
        },
    }
}

impl PageSpec {
    /// Names of fields whose submitted value must be a JSON number
    pub fn numeric_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| {
                matches!(
                    f.widget,
                    Widget::Slider { .. } | Widget::Radio { numeric: true, .. }
                )
            })
            .map(|f| f.name)
            .collect()
    }

    /// Render the page as a self-contained HTML document
    pub fn render(&self) -> String {
        let mut widgets = String::new();
        for field in &self.fields {
            match &field.widget {
                Widget::Slider {
                    min,
                    max,
                    step,
                    default,
                } => {
                    write!(
                        widgets,
                        r#"<div class="field"><label for="{name}">{label}</label>
<input type="range" id="{name}" name="{name}" min="{min}" max="{max}" step="{step}" value="{default}"
 oninput="document.getElementById('{name}-val').textContent = this.value">
<span class="val" id="{name}-val">{default}</span></div>
"#,
                        name = field.name,
                        label = field.label,
                        min = min,
                        max = max,
                        step = step,
                        default = default,
                    )
                    .ok();
                }
                Widget::Radio {
                    options, default, ..
                } => {
                    write!(
                        widgets,
                        r#"<div class="field"><span class="radio-label">{label}</span>"#,
                        label = field.label
                    )
                    .ok();
                    for option in options {
                        let checked = if option == default { " checked" } else { "" };
                        write!(
                            widgets,
                            r#" <label><input type="radio" name="{name}" value="{option}"{checked}> {option}</label>"#,
                            name = field.name,
                            option = option,
                            checked = checked,
                        )
                        .ok();
                    }
                    widgets.push_str("</div>\n");
                }
            }
        }

        let numeric_fields = self
            .numeric_fields()
            .iter()
            .map(|name| format!("\"{}\"", name))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 720px; margin: 2em auto; }}
.field {{ margin: 0.8em 0; }}
.field label, .radio-label {{ display: block; margin-bottom: 0.2em; }}
input[type=range] {{ width: 60%; vertical-align: middle; }}
.val {{ margin-left: 0.5em; }}
#output {{ width: 12em; }}
button {{ margin: 1em 0; padding: 0.4em 1.6em; }}
</style>
</head>
<body>
<h1>{title}</h1>
<p>{description}</p>
<form id="predict-form">
{widgets}</form>
<button id="submit">Submit</button>
<div class="field"><label for="output">{output_label}</label>
<input type="text" id="output" readonly></div>
<script>
const NUMERIC = [{numeric_fields}];
document.getElementById('submit').addEventListener('click', async () => {{
  const form = document.getElementById('predict-form');
  const data = Object.fromEntries(new FormData(form));
  for (const key of NUMERIC) data[key] = Number(data[key]);
  const output = document.getElementById('output');
  try {{
    const res = await fetch('/predict', {{
      method: 'POST',
      headers: {{ 'Content-Type': 'application/json' }},
      body: JSON.stringify(data),
    }});
    const body = await res.json();
    output.value = res.ok ? body.{output_field} : (body.error || 'request failed');
  }} catch (err) {{
    output.value = 'request failed';
  }}
}});
</script>
</body>
</html>
"#,
            title = self.title,
            description = self.description,
            widgets = widgets,
            output_label = self.output_label,
            output_field = self.output_field,
            numeric_fields = numeric_fields,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_forms_have_twelve_fields() {
        assert_eq!(survival_page().fields.len(), 12);
        assert_eq!(death_event_page().fields.len(), 12);
    }

    #[test]
    fn test_survival_page_categoricals_are_strings() {
        let page = survival_page();
        let numeric = page.numeric_fields();
        assert!(!numeric.contains(&"anaemia"));
        assert!(!numeric.contains(&"sex"));
        assert!(numeric.contains(&"age"));
        assert!(numeric.contains(&"platelets"));
    }

    #[test]
    fn test_death_event_page_is_fully_numeric() {
        let page = death_event_page();
        assert_eq!(page.numeric_fields().len(), 12);
    }

    #[test]
    fn test_render_contains_widgets_and_labels() {
        let html = survival_page().render();
        assert!(html.contains("Patient Survival Prediction"));
        assert!(html.contains("Follow-up period (days)"));
        assert!(html.contains(r#"min="40" max="100""#));
        assert!(html.contains(r#"value="M""#));
        assert!(html.contains("/predict"));
    }

    #[test]
    fn test_form_bounds_differ() {
        let v1 = survival_page().render();
        let v2 = death_event_page().render();
        assert!(v1.contains(r#"min="23" max="1281""#));
        assert!(v2.contains(r#"min="0" max="10""#));
    }
}
