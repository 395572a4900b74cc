//! Input validation helpers
//!
//! Payloads are checked here, before they reach the repository; the
//! repository assumes pre-validated input.

use shared::models::{CategoryCreate, CategoryUpdate, ItemCreate, ItemUpdate, RestaurantData, RestaurantInfo};

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: restaurant, category, item
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions, footer texts
pub const MAX_NOTE_LEN: usize = 500;

/// Short texts: wifi name/password, preparation time
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Admin secret bounds
pub const MIN_PASSWORD_LEN: usize = 4;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Highest allowed rating
pub const MAX_RATING: f64 = 5.0;

// ── Generic helpers ─────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    validate_max_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => validate_max_len(v, field, max_len),
        None => Ok(()),
    }
}

fn validate_max_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}

/// Price must be a finite number strictly greater than zero.
pub fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::validation(format!(
            "price must be greater than 0 (got {price})"
        )));
    }
    Ok(())
}

fn validate_rating(rating: Option<f64>) -> Result<(), AppError> {
    if let Some(r) = rating
        && !(0.0..=MAX_RATING).contains(&r)
    {
        return Err(AppError::validation(format!(
            "rating must be between 0 and {MAX_RATING} (got {r})"
        )));
    }
    Ok(())
}

// ── Payload validators ──────────────────────────────────────────────

pub fn validate_info(info: &RestaurantInfo) -> Result<(), AppError> {
    validate_required_text(&info.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&info.logo, "logo", MAX_URL_LEN)?;
    validate_optional_text(&info.background_image, "backgroundImage", MAX_URL_LEN)?;
    if let Some(wifi) = &info.wifi {
        validate_max_len(&wifi.name, "wifi.name", MAX_SHORT_TEXT_LEN)?;
        validate_max_len(&wifi.password, "wifi.password", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(footer) = &info.footer {
        validate_max_len(&footer.welcome_text, "footer.welcomeText", MAX_NOTE_LEN)?;
        validate_max_len(&footer.price_note, "footer.priceNote", MAX_NOTE_LEN)?;
        validate_max_len(&footer.copyright, "footer.copyright", MAX_NOTE_LEN)?;
    }
    Ok(())
}

pub fn validate_category_create(data: &CategoryCreate) -> Result<(), AppError> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_required_text(
        data.description.as_deref().unwrap_or_default(),
        "description",
        MAX_NOTE_LEN,
    )
}

pub fn validate_category_update(data: &CategoryUpdate) -> Result<(), AppError> {
    if data.is_empty() {
        return Err(AppError::validation("nothing to update"));
    }
    if let Some(name) = &data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)
}

pub fn validate_item_create(data: &ItemCreate) -> Result<(), AppError> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&data.description, "description", MAX_NOTE_LEN)?;
    validate_price(data.price)?;
    validate_optional_text(&data.image, "image", MAX_URL_LEN)?;
    validate_optional_text(&data.preparation_time, "preparationTime", MAX_SHORT_TEXT_LEN)?;
    validate_rating(data.rating)
}

pub fn validate_item_update(data: &ItemUpdate) -> Result<(), AppError> {
    if let Some(name) = &data.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
    if let Some(price) = data.price {
        validate_price(price)?;
    }
    validate_optional_text(&data.image, "image", MAX_URL_LEN)?;
    validate_optional_text(&data.preparation_time, "preparationTime", MAX_SHORT_TEXT_LEN)?;
    validate_rating(data.rating)
}

pub fn validate_new_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "new password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    validate_max_len(password, "new password", MAX_PASSWORD_LEN)
}

/// Bulk import payload: info and credential are mandatory, ids must be usable keys.
pub fn validate_import(data: &RestaurantData) -> Result<(), AppError> {
    validate_info(&data.info)?;
    validate_required_text(&data.admin_password, "adminPassword", MAX_PASSWORD_LEN)?;
    for category in &data.categories {
        validate_required_text(&category.id, "category.id", MAX_NAME_LEN)?;
        for item in &category.items {
            validate_required_text(&item.id, "item.id", MAX_NAME_LEN)?;
            validate_price(item.price)?;
            validate_rating(item.rating)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: f64) -> ItemCreate {
        ItemCreate {
            name: "Baklava".to_string(),
            description: "Fıstıklı".to_string(),
            price,
            image: None,
            available: None,
            preparation_time: None,
            rating: None,
            review_count: None,
        }
    }

    #[test]
    fn zero_price_is_rejected_but_a_cent_is_fine() {
        assert!(matches!(
            validate_item_create(&item(0.0)),
            Err(AppError::Validation(_))
        ));
        assert!(validate_item_create(&item(-3.0)).is_err());
        assert!(validate_item_create(&item(f64::NAN)).is_err());
        assert!(validate_item_create(&item(0.01)).is_ok());
    }

    #[test]
    fn import_applies_the_same_price_rule() {
        let mut data = crate::menu::static_data::static_data().clone();
        assert!(validate_import(&data).is_ok());

        data.categories[0].items[0].price = 0.0;
        assert!(matches!(validate_import(&data), Err(AppError::Validation(_))));

        data.categories[0].items[0].price = 25.0;
        data.categories[0].items[0].rating = Some(7.0);
        assert!(validate_import(&data).is_err());
    }

    #[test]
    fn item_requires_name_and_description() {
        let mut data = item(10.0);
        data.description = "   ".to_string();
        assert!(validate_item_create(&data).is_err());

        let mut data = item(10.0);
        data.name = String::new();
        assert!(validate_item_create(&data).is_err());
    }

    #[test]
    fn rating_must_stay_within_bounds() {
        let mut data = item(10.0);
        data.rating = Some(5.5);
        assert!(validate_item_create(&data).is_err());
        data.rating = Some(5.0);
        assert!(validate_item_create(&data).is_ok());
    }

    #[test]
    fn category_needs_name_and_description() {
        let ok = CategoryCreate {
            name: "Tatlılar".to_string(),
            description: Some("Ev yapımı".to_string()),
        };
        assert!(validate_category_create(&ok).is_ok());

        let missing = CategoryCreate {
            name: "Tatlılar".to_string(),
            description: None,
        };
        assert!(validate_category_create(&missing).is_err());
        assert!(validate_category_update(&CategoryUpdate::default()).is_err());
    }

    #[test]
    fn password_length_limits() {
        assert!(validate_new_password("abc").is_err());
        assert!(validate_new_password("abcd").is_ok());
        assert!(validate_new_password(&"x".repeat(MAX_PASSWORD_LEN + 1)).is_err());
    }
}
