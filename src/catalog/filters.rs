//! Catalog filter form and the option lists derived from the fleet

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::client::QueryParams;
use crate::models::Car;

/// One field of the filter form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Model,
    Brand,
    Type,
    MinPrice,
    MaxPrice,
}

impl FilterField {
    /// Query parameter name used by `/cars/search`
    pub fn param(&self) -> &'static str {
        match self {
            FilterField::Model => "model",
            FilterField::Brand => "brand",
            FilterField::Type => "type",
            FilterField::MinPrice => "minPrice",
            FilterField::MaxPrice => "maxPrice",
        }
    }
}

/// Filter form state; every field is free text and optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarFilters {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub brand: String,
    #[serde(rename = "type", default)]
    pub car_type: String,
    #[serde(default)]
    pub min_price: String,
    #[serde(default)]
    pub max_price: String,
}

impl CarFilters {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Model => &self.model,
            FilterField::Brand => &self.brand,
            FilterField::Type => &self.car_type,
            FilterField::MinPrice => &self.min_price,
            FilterField::MaxPrice => &self.max_price,
        }
    }

    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::Model => self.model = value,
            FilterField::Brand => self.brand = value,
            FilterField::Type => self.car_type = value,
            FilterField::MinPrice => self.min_price = value,
            FilterField::MaxPrice => self.max_price = value,
        }
    }

    /// Non-empty fields as `/cars/search` parameters, in form order
    pub fn query_params(&self) -> QueryParams {
        [
            FilterField::Model,
            FilterField::Brand,
            FilterField::Type,
            FilterField::MinPrice,
            FilterField::MaxPrice,
        ]
        .into_iter()
        .filter_map(|field| {
            let value = self.get(field).trim();
            (!value.is_empty()).then(|| (field.param(), value.to_string()))
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.query_params().is_empty()
    }
}

/// Brand and type choices offered by the filter form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub brands: Vec<String>,
    pub types: Vec<String>,
}

impl FilterOptions {
    /// Sorted, de-duplicated brands and types; blanks are dropped
    pub fn from_cars(cars: &[Car]) -> Self {
        Self {
            brands: sorted_unique(cars.iter().map(|c| c.brand.as_str())),
            types: sorted_unique(cars.iter().map(|c| c.car_type.as_str())),
        }
    }
}

/// Sorted, de-duplicated models observed for `brand`
///
/// Empty when no brand is selected or the brand has no cars.
pub fn models_for_brand(cars: &[Car], brand: &str) -> Vec<String> {
    if brand.is_empty() {
        return Vec::new();
    }

    sorted_unique(
        cars.iter()
            .filter(|c| c.brand == brand)
            .map(|c| c.model.as_str()),
    )
}

fn sorted_unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet() -> Vec<Car> {
        vec![
            Car::new(1, "Toyota", "Corolla", "Sedan"),
            Car::new(2, "Honda", "City", "Sedan"),
            Car::new(3, "Toyota", "Fortuner", "SUV"),
            Car::new(4, "Toyota", "Corolla", "Sedan"),
            Car::new(5, "", "Mystery", ""),
        ]
    }

    #[test]
    fn test_only_non_empty_fields_become_params() {
        let filters = CarFilters {
            brand: "Toyota".to_string(),
            max_price: " 3000 ".to_string(),
            model: "   ".to_string(),
            ..CarFilters::default()
        };

        assert_eq!(
            filters.query_params(),
            vec![("brand", "Toyota".to_string()), ("maxPrice", "3000".to_string())]
        );
        assert!(!filters.is_empty());
        assert!(CarFilters::default().is_empty());
    }

    #[test]
    fn test_options_are_sorted_and_unique() {
        let options = FilterOptions::from_cars(&fleet());
        assert_eq!(options.brands, vec!["Honda", "Toyota"]);
        assert_eq!(options.types, vec!["SUV", "Sedan"]);
    }

    #[test]
    fn test_models_for_brand() {
        let cars = fleet();
        assert_eq!(models_for_brand(&cars, "Toyota"), vec!["Corolla", "Fortuner"]);
        assert_eq!(models_for_brand(&cars, "Honda"), vec!["City"]);
        assert!(models_for_brand(&cars, "Tesla").is_empty());
        assert!(models_for_brand(&cars, "").is_empty());
    }

    #[test]
    fn test_set_and_get_round_trip_fields() {
        let mut filters = CarFilters::default();
        filters.set(FilterField::Type, "SUV");
        filters.set(FilterField::MinPrice, "1500");
        assert_eq!(filters.get(FilterField::Type), "SUV");
        assert_eq!(filters.query_params()[0], ("type", "SUV".to_string()));
    }
}
