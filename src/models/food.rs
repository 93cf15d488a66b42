use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;
use uuid::Uuid;

pub const MAX_GRAMS: f64 = 5000.0;
const MAX_KCAL_PER_100G: f64 = 900.0;
const MAX_PROTEIN_PER_100G: f64 = 100.0;
const MAX_CARBS_PER_100G: f64 = 200.0;
const MAX_FAT_PER_100G: f64 = 100.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack];
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Breakfast => write!(f, "breakfast"),
            Self::Lunch => write!(f, "lunch"),
            Self::Dinner => write!(f, "dinner"),
            Self::Snack => write!(f, "snack"),
        }
    }
}

impl FromStr for MealType {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snack" => Ok(Self::Snack),
            _ => anyhow::bail!(
                "invalid meal: {} (expected breakfast/lunch/dinner/snack)",
                s
            ),
        }
    }
}

/// Energy and macronutrients, either per 100 g or as totals for a portion.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Macros {
    pub kcal: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl Macros {
    pub fn new(kcal: f64, protein_g: f64, carbs_g: f64, fat_g: f64) -> Self {
        Self {
            kcal,
            protein_g,
            carbs_g,
            fat_g,
        }
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self {
            kcal: self.kcal * factor,
            protein_g: self.protein_g * factor,
            carbs_g: self.carbs_g * factor,
            fat_g: self.fat_g * factor,
        }
    }

    /// Totals for `grams` of a food described per 100 g.
    pub fn for_portion(&self, grams: f64) -> Self {
        self.scale(grams / 100.0)
    }

    fn is_non_negative(&self) -> bool {
        [self.kcal, self.protein_g, self.carbs_g, self.fat_g]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

impl Add for Macros {
    type Output = Macros;
    fn add(self, rhs: Macros) -> Macros {
        Macros {
            kcal: self.kcal + rhs.kcal,
            protein_g: self.protein_g + rhs.protein_g,
            carbs_g: self.carbs_g + rhs.carbs_g,
            fat_g: self.fat_g + rhs.fat_g,
        }
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, rhs: Macros) {
        *self = *self + rhs;
    }
}

impl Sub for Macros {
    type Output = Macros;
    fn sub(self, rhs: Macros) -> Macros {
        Macros {
            kcal: self.kcal - rhs.kcal,
            protein_g: self.protein_g - rhs.protein_g,
            carbs_g: self.carbs_g - rhs.carbs_g,
            fat_g: self.fat_g - rhs.fat_g,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodEntry {
    pub id: String,
    pub date: NaiveDate,
    pub meal: MealType,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub brand: String,
    pub grams: f64,
    #[serde(flatten)]
    pub totals: Macros,
}

impl FoodEntry {
    /// The `name (brand)` label used to pick an entry in lists.
    pub fn label(&self) -> String {
        label(&self.name, &self.brand)
    }
}

/// A favourite food, unique by `(name, brand)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub brand: String,
    pub per_100g: Macros,
}

impl CatalogItem {
    pub fn label(&self) -> String {
        label(&self.name, &self.brand)
    }
}

fn label(name: &str, brand: &str) -> String {
    if brand.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, brand)
    }
}

/// Request to log a portion of food.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFood {
    pub date: NaiveDate,
    pub meal: MealType,
    pub name: String,
    pub brand: String,
    pub grams: f64,
    pub per_100g: Macros,
}

impl NewFood {
    /// Prefill a request from a catalog item.
    pub fn from_catalog(item: &CatalogItem, date: NaiveDate, meal: MealType, grams: f64) -> Self {
        Self {
            date,
            meal,
            name: item.name.clone(),
            brand: item.brand.clone(),
            grams,
            per_100g: item.per_100g,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("food name must not be empty");
        }
        if !self.grams.is_finite() || self.grams <= 0.0 || self.grams > MAX_GRAMS {
            anyhow::bail!("grams must be in (0, {}], got {}", MAX_GRAMS, self.grams);
        }
        if !self.per_100g.is_non_negative() {
            anyhow::bail!("per-100g values must be non-negative");
        }
        if self.per_100g.kcal > MAX_KCAL_PER_100G {
            anyhow::bail!(
                "kcal per 100g must be at most {}, got {}",
                MAX_KCAL_PER_100G,
                self.per_100g.kcal
            );
        }
        for (name, v, max) in [
            ("protein", self.per_100g.protein_g, MAX_PROTEIN_PER_100G),
            ("carbs", self.per_100g.carbs_g, MAX_CARBS_PER_100G),
            ("fat", self.per_100g.fat_g, MAX_FAT_PER_100G),
        ] {
            if v > max {
                anyhow::bail!("{} per 100g cannot exceed {} g, got {}", name, max, v);
            }
        }
        Ok(())
    }

    pub fn into_entry(self) -> FoodEntry {
        let totals = self.per_100g.for_portion(self.grams);
        FoodEntry {
            id: Uuid::new_v4().to_string(),
            date: self.date,
            meal: self.meal,
            name: self.name,
            brand: self.brand,
            grams: self.grams,
            totals,
        }
    }
}

/// Partial update of a logged entry. Totals are edited directly; when only
/// `grams` changes the existing totals are rescaled proportionally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodEdit {
    pub meal: Option<MealType>,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub grams: Option<f64>,
    pub kcal: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
}

impl FoodEdit {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn touches_totals(&self) -> bool {
        self.kcal.is_some()
            || self.protein_g.is_some()
            || self.carbs_g.is_some()
            || self.fat_g.is_some()
    }

    pub fn apply(&self, entry: &FoodEntry) -> anyhow::Result<FoodEntry> {
        let mut out = entry.clone();
        if let Some(meal) = self.meal {
            out.meal = meal;
        }
        if let Some(ref name) = self.name {
            if name.trim().is_empty() {
                anyhow::bail!("food name must not be empty");
            }
            out.name = name.clone();
        }
        if let Some(ref brand) = self.brand {
            out.brand = brand.clone();
        }
        if let Some(grams) = self.grams {
            if !grams.is_finite() || grams <= 0.0 || grams > MAX_GRAMS {
                anyhow::bail!("grams must be in (0, {}], got {}", MAX_GRAMS, grams);
            }
            if !self.touches_totals() {
                out.totals = entry.totals.scale(grams / entry.grams);
            }
            out.grams = grams;
        }
        if let Some(v) = self.kcal {
            out.totals.kcal = v;
        }
        if let Some(v) = self.protein_g {
            out.totals.protein_g = v;
        }
        if let Some(v) = self.carbs_g {
            out.totals.carbs_g = v;
        }
        if let Some(v) = self.fat_g {
            out.totals.fat_g = v;
        }
        if !out.totals.is_non_negative() {
            anyhow::bail!("totals must be non-negative");
        }
        Ok(out)
    }
}
