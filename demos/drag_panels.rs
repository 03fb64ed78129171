#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe::egui;
use egui_draggable::{Document, DragOptions, Element};

struct App {
    document: Document,
}

impl App {
    fn new() -> Self {
        let mut document = Document::new();

        document.elements_mut().insert(
            "notes",
            Element::new(egui::pos2(0.0, 0.0), egui::vec2(260.0, 180.0)),
        );
        document.elements_mut().insert(
            "notes_title",
            Element::new(egui::pos2(0.0, 0.0), egui::vec2(260.0, 24.0)),
        );
        document.elements_mut().insert(
            "palette",
            Element::new(egui::pos2(400.0, 80.0), egui::vec2(180.0, 240.0)),
        );

        // The notes panel drags by its title strip and starts at a fixed
        // spot; the palette drags by its whole body and stays where it was
        // registered.
        let options = DragOptions::from_style_strings(Some("60px"), Some("40px"))
            .expect("hardcoded lengths parse");
        document
            .bind_drag("notes", "notes_title", options)
            .expect("notes and notes_title are registered");
        document
            .bind_drag("palette", "palette", DragOptions::default())
            .expect("palette is registered");

        Self { document }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.document.ui(ui, |ui, id, element| match id.as_str() {
                "notes" => {
                    ui.add_space(28.0);
                    ui.label(format!("top-left: {:?}", element.pos()));
                    ui.label("Drag me by the title strip.");
                }
                "notes_title" => {
                    ui.add(egui::Label::new("Notes").selectable(false));
                }
                "palette" => {
                    ui.add(egui::Label::new("Palette").selectable(false));
                    ui.label("Drag me anywhere.");
                }
                _ => {}
            });
        });
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_title("egui_draggable demo"),
        ..Default::default()
    };

    eframe::run_native(
        "egui_draggable demo",
        options,
        Box::new(|_cc| Ok(Box::new(App::new()))),
    )
}
