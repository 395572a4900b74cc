//! Bundled demo dataset served while the store holds no real tenant data

use std::sync::LazyLock;

use shared::models::{FooterInfo, MenuCategory, MenuItem, RestaurantData, RestaurantInfo, WifiInfo};

/// Category count at or above which the store counts as configured
pub const MIN_CATEGORIES_THRESHOLD: usize = 1;

const ITEM_NOTE: &str = "Admin panelinden düzenleyebilirsiniz";

static STATIC_DATA: LazyLock<RestaurantData> = LazyLock::new(build);

/// The demo dataset; never mutated
pub fn static_data() -> &'static RestaurantData {
    &STATIC_DATA
}

/// Name of the demo restaurant, used to tell demo info apart from real info
pub fn static_name() -> &'static str {
    &STATIC_DATA.info.name
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: &str,
    name: &str,
    label: &str,
    price: f64,
    photo: &str,
    preparation_time: &str,
    rating: f64,
    review_count: u32,
) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("Demo {label} ürünü - {ITEM_NOTE}"),
        price,
        image: Some(format!(
            "https://images.unsplash.com/{photo}?w=400&h=300&fit=crop&crop=center"
        )),
        available: true,
        preparation_time: Some(preparation_time.to_string()),
        rating: Some(rating),
        review_count: Some(review_count),
    }
}

fn category(id: &str, name: &str, label: &str, order: i32, items: Vec<MenuItem>) -> MenuCategory {
    MenuCategory {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(format!("Demo {label} kategorisi")),
        order,
        items,
    }
}

fn build() -> RestaurantData {
    RestaurantData {
        info: RestaurantInfo {
            name: "QR Menü Demo Restoran".to_string(),
            logo: Some(
                "https://images.unsplash.com/photo-1559925393-8be0ec4767c8?w=200&h=200&fit=crop&crop=center"
                    .to_string(),
            ),
            background_image: Some(
                "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2070&q=80"
                    .to_string(),
            ),
            wifi: Some(WifiInfo {
                name: "Demo_WiFi".to_string(),
                password: "demo123".to_string(),
            }),
            footer: Some(FooterInfo {
                welcome_text: "Bu demo menüdür. Admin panelinden kendi verilerinizi ekleyebilirsiniz."
                    .to_string(),
                price_note: "Fiyatlar demo amaçlıdır".to_string(),
                copyright: "© 2024 QR Menü Demo • Admin panelinden düzenleyebilirsiniz".to_string(),
            }),
        },
        categories: vec![
            category(
                "demo-sicak-icecekler",
                "Sıcak İçecekler",
                "sıcak içecek",
                1,
                vec![
                    item("demo-kahve", "Kahve", "kahve", 25.0, "photo-1509042239860-f550ce710b93", "3-5 dk", 4.5, 50),
                    item("demo-cay", "Çay", "çay", 15.0, "photo-1594631661960-4baa99394ac4", "2-3 dk", 4.0, 25),
                ],
            ),
            category(
                "demo-soguk-icecekler",
                "Soğuk İçecekler",
                "soğuk içecek",
                2,
                vec![
                    item("demo-su", "Su", "su", 5.0, "photo-1550672652-85cbb7d3b9c0", "Hemen", 5.0, 10),
                    item("demo-meyve-suyu", "Meyve Suyu", "meyve suyu", 20.0, "photo-1613478223719-2ab802602423", "1-2 dk", 4.2, 15),
                ],
            ),
            category(
                "demo-atistirmaliklar",
                "Atıştırmalıklar",
                "atıştırmalık",
                3,
                vec![item("demo-kurabiye", "Kurabiye", "kurabiye", 12.0, "photo-1499636136210-6f4ee915583e", "Hemen", 4.3, 20)],
            ),
        ],
        admin_password: "admin123".to_string(),
    }
}
