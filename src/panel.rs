use crate::core::controls::{Applied, Binding, Control, Section};
use crate::core::SceneParams;
use crate::dom::{self, js_err};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// The DOM tuning panel. Each input writes straight into the shared params;
/// the panel never reads them back after building a control.
pub struct Panel {
    document: web::Document,
    body: web::Element,
    params: Rc<RefCell<SceneParams>>,
}

impl Panel {
    /// Build the (initially closed) panel root and attach it to `<body>`.
    pub fn create(document: &web::Document, params: Rc<RefCell<SceneParams>>) -> anyhow::Result<Rc<Self>> {
        let root = document.create_element("div").map_err(js_err)?;
        root.set_class_name("tuning-panel closed");

        let title = document.create_element("div").map_err(js_err)?;
        title.set_class_name("tuning-title");
        title.set_text_content(Some("Controls"));
        let toggle_root = root.clone();
        dom::add_listener(&title, "click", move |_: web::Event| {
            _ = toggle_root.class_list().toggle("closed");
        });
        root.append_child(&title).map_err(js_err)?;

        let body = document.create_element("div").map_err(js_err)?;
        body.set_class_name("tuning-body");
        root.append_child(&body).map_err(js_err)?;

        let page = document
            .body()
            .ok_or_else(|| anyhow::anyhow!("no <body>"))?;
        page.append_child(&root).map_err(js_err)?;

        Ok(Rc::new(Self {
            document: document.clone(),
            body,
            params,
        }))
    }

    pub fn add_section(&self, section: Section) -> anyhow::Result<()> {
        let details = self.document.create_element("details").map_err(js_err)?;
        if section.open {
            details.set_attribute("open", "").map_err(js_err)?;
        }
        let summary = self.document.create_element("summary").map_err(js_err)?;
        summary.set_text_content(Some(section.title));
        details.append_child(&summary).map_err(js_err)?;

        for control in &section.controls {
            let row = self.control_row(*control)?;
            details.append_child(&row).map_err(js_err)?;
        }
        self.body.append_child(&details).map_err(js_err)?;
        log::info!("[panel] section '{}' ({} controls)", section.title, section.controls.len());
        Ok(())
    }

    fn control_row(&self, control: Control) -> anyhow::Result<web::Element> {
        let row = self.document.create_element("label").map_err(js_err)?;
        row.set_class_name("tuning-row");
        let name = self.document.create_element("span").map_err(js_err)?;
        name.set_text_content(Some(control.label));
        row.append_child(&name).map_err(js_err)?;

        let input: web::HtmlInputElement = self
            .document
            .create_element("input")
            .map_err(js_err)?
            .dyn_into::<web::HtmlInputElement>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        let readout = self.document.create_element("output").map_err(js_err)?;

        let mut params = self.params.borrow_mut();
        match control.binding {
            Binding::Scalar { min, max, step, .. } => {
                input.set_type("range");
                input.set_min(&min.to_string());
                input.set_max(&max.to_string());
                input.set_step(&step.to_string());
                let value = control.scalar(&mut params).unwrap_or(min);
                input.set_value(&value.to_string());
                readout.set_text_content(Some(&format_value(value)));
            }
            Binding::Color { .. } => {
                input.set_type("color");
                if let Some(hex) = control.color_hex(&mut params) {
                    input.set_value(&hex);
                    readout.set_text_content(Some(&hex));
                }
            }
            Binding::Toggle { .. } => {
                input.set_type("checkbox");
                input.set_checked(control.flag(&mut params).unwrap_or(false));
            }
        }
        drop(params);

        let event = match control.binding {
            Binding::Toggle { .. } => "change",
            _ => "input",
        };
        let shared = self.params.clone();
        let field = input.clone();
        let out = readout.clone();
        dom::add_listener(&input, event, move |_: web::Event| {
            let mut params = shared.borrow_mut();
            let applied = match control.binding {
                Binding::Scalar { .. } => {
                    let v = field.value_as_number() as f32;
                    let applied = control.set_scalar(&mut params, v);
                    if let Some(now) = control.scalar(&mut params) {
                        out.set_text_content(Some(&format_value(now)));
                    }
                    applied
                }
                Binding::Color { .. } => {
                    let hex = field.value();
                    out.set_text_content(Some(&hex));
                    control.set_color_hex(&mut params, &hex)
                }
                Binding::Toggle { .. } => control.set_flag(&mut params, field.checked()),
            };
            if applied == Applied::Changed {
                log::debug!("[panel] {} changed", control.label);
            }
        });

        row.append_child(&input).map_err(js_err)?;
        row.append_child(&readout).map_err(js_err)?;
        Ok(row)
    }
}

fn format_value(v: f32) -> String {
    format!("{:.3}", v)
}
