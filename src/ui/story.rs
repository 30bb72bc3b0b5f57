use eframe::egui::{self, RichText, Ui};

const STORY_SIZE: f32 = 16.0;

// ---------------------------------------------------------------------------
// Narrative section shown above the data
// ---------------------------------------------------------------------------

const INTRODUCTION: &str = "Waste management is a core part of environmental \
sustainability. Knowing where waste comes from, what kind it is and when it \
peaks helps target reduction and recycling work. This dashboard breaks the \
waste data down by building, stream and date.";

const VISUALIZATIONS: [(&str, &str); 3] = [
    (
        "Bar chart",
        "weight of waste per date, stacked by stream, for the selected filters.",
    ),
    (
        "Pie chart",
        "how the selected records split across waste streams.",
    ),
    (
        "Summary statistics",
        "descriptive statistics of weight and volume for the selected records.",
    ),
];

const INSIGHTS: [(&str, &str); 4] = [
    (
        "Dominant waste streams",
        "Recycling and Landfill make up most records. Recycling effort is \
         strong, yet a large share of waste still goes to landfill.",
    ),
    (
        "Building-specific generation",
        "Buildings such as Facilities generate more waste, likely because of \
         the volume and kind of work done there. Targeted programmes would pay \
         off most in those buildings.",
    ),
    (
        "Seasonal and temporal trends",
        "The bar chart shows spikes in some months, which line up with events \
         such as annual clean-ups or busier periods of the year.",
    ),
    (
        "Effectiveness of recycling programmes",
        "Comparing streams over time shows whether recycling initiatives work: \
         a rising recycling share points to a positive impact.",
    ),
];

const CONCLUSION: &str = "Together the views identify the dominant streams, \
the buildings that generate the most waste and the seasonal pattern of \
generation. These point at where reduction and recycling initiatives should \
go next.";

/// Render the collapsible story section.
pub fn story(ui: &mut Ui) {
    egui::CollapsingHeader::new(
        RichText::new("Story: Enhancing Waste Management through Data-Driven Insights").strong(),
    )
    .id_salt("story")
    .default_open(false)
    .show(ui, |ui: &mut Ui| {
        ui.label(RichText::new("Introduction").strong());
        paragraph(ui, INTRODUCTION);

        ui.add_space(6.0);
        ui.label(RichText::new("Visualization Description").strong());
        for (title, text) in VISUALIZATIONS {
            bullet(ui, title, text);
        }

        ui.add_space(6.0);
        ui.label(RichText::new("Analysis and Insights").strong());
        for (i, (title, text)) in INSIGHTS.iter().enumerate() {
            bullet(ui, &format!("{}. {title}", i + 1), text);
        }

        ui.add_space(6.0);
        ui.label(RichText::new("Interpretation and Conclusion").strong());
        paragraph(ui, CONCLUSION);
    });
}

fn paragraph(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(STORY_SIZE).family(egui::FontFamily::Proportional));
}

fn bullet(ui: &mut Ui, title: &str, text: &str) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.label(RichText::new(format!("• {title}:")).size(STORY_SIZE).strong());
        ui.label(RichText::new(text).size(STORY_SIZE));
    });
}
