use serde::{Deserialize, Serialize};

/// Declares an enum of named view elements together with the stable
/// identifier each one is bound to in a host view.
macro_rules! element_enum {
    ($name:ident { $($variant:ident => $id:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn element_id(self) -> &'static str {
                match self {
                    $($name::$variant => $id),+
                }
            }
        }
    };
}

/// The two mutually exclusive views of the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    #[default]
    Form,
    Results,
}

impl Panel {
    pub fn element_id(self) -> &'static str {
        match self {
            Panel::Form => "calculator-section",
            Panel::Results => "results-section",
        }
    }
}

element_enum!(Control {
    HeroCta => "hero-cta-button",
    Form => "carbon-form",
    StartOver => "start-over-button",
    Recalculate => "recalculate-button",
});

element_enum!(DisplayField {
    TotalFootprint => "total-footprint",
    TreesOffset => "trees-offset",
    TransportTotal => "transport-total",
    TransportPercentage => "transport-percentage",
    CarEmissions => "car-emissions",
    TransitEmissions => "transit-emissions",
    FlightEmissions => "flight-emissions",
    EnergyTotal => "energy-total",
    EnergyPercentage => "energy-percentage",
    ElectricityEmissions => "electricity-emissions",
    NaturalGasEmissions => "natural-gas-emissions",
    TransportProgressLabel => "transport-progress-label",
    EnergyProgressLabel => "energy-progress-label",
});

element_enum!(ProgressBar {
    Transport => "transport-progress",
    Energy => "energy-progress",
});

impl ProgressBar {
    pub fn label(self) -> DisplayField {
        match self {
            ProgressBar::Transport => DisplayField::TransportProgressLabel,
            ProgressBar::Energy => DisplayField::EnergyProgressLabel,
        }
    }
}

/// Any element the controller reads from, writes to, or listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindPoint {
    Panel(Panel),
    Control(Control),
    Display(DisplayField),
    Progress(ProgressBar),
}

impl BindPoint {
    pub fn element_id(self) -> &'static str {
        match self {
            BindPoint::Panel(panel) => panel.element_id(),
            BindPoint::Control(control) => control.element_id(),
            BindPoint::Display(field) => field.element_id(),
            BindPoint::Progress(bar) => bar.element_id(),
        }
    }

    /// Every bind point a calculator view has to provide.
    pub fn all() -> impl Iterator<Item = BindPoint> {
        [Panel::Form, Panel::Results]
            .into_iter()
            .map(BindPoint::Panel)
            .chain(Control::ALL.iter().copied().map(BindPoint::Control))
            .chain(DisplayField::ALL.iter().copied().map(BindPoint::Display))
            .chain(ProgressBar::ALL.iter().copied().map(BindPoint::Progress))
    }
}

/// Input fields of the calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    PersonalCar,
    PublicTransit,
    Flights,
    Electricity,
    NaturalGas,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::PersonalCar,
        FormField::PublicTransit,
        FormField::Flights,
        FormField::Electricity,
        FormField::NaturalGas,
    ];

    /// Key used in the submitted JSON object.
    pub fn key(self) -> &'static str {
        match self {
            FormField::PersonalCar => "personal_car",
            FormField::PublicTransit => "public_transit",
            FormField::Flights => "flights",
            FormField::Electricity => "electricity",
            FormField::NaturalGas => "natural_gas",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::PersonalCar => "Car travel (miles / month)",
            FormField::PublicTransit => "Public transit (miles / month)",
            FormField::Flights => "Flights (miles / year)",
            FormField::Electricity => "Electricity (kWh / month)",
            FormField::NaturalGas => "Natural gas (therms / month)",
        }
    }
}
