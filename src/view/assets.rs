//! Asset table view model.
//!
//! Pure derivation: dataset + sort selection in, ordered rows out. With no
//! selection the rows keep feed order. Numeric columns compare as parsed
//! floats; the name column compares as raw text. An undefined float
//! comparison (NaN on either side) counts as equal, so the relative position
//! of unparsable records is comparator-dependent -- inherited behavior, kept.

use std::cmp::Ordering;

use crate::model::{Asset, AssetSnapshot, format_decimal};

use super::sort::{SortDirection, SortKey, SortSelection};

/// One rendered table row.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRow {
    pub name: String,
    /// 24h change, 5 decimal places.
    pub change_text: String,
    /// Presentation hint: red when negative, green otherwise.
    pub change_negative: bool,
    /// USD price, 5 decimal places.
    pub price_text: String,
}

/// Everything the table widget needs: headers (sorted column carries an
/// arrow) and rows in final order.
#[derive(Debug, Clone)]
pub struct AssetTableView {
    pub headers: Vec<String>,
    pub rows: Vec<AssetRow>,
}

/// Compares two assets on one column.
fn compare(a: &Asset, b: &Asset, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::PriceUsd => a
            .price_usd_f64()
            .partial_cmp(&b.price_usd_f64())
            .unwrap_or(Ordering::Equal),
        SortKey::ChangePercent24Hr => a
            .change_percent_f64()
            .partial_cmp(&b.change_percent_f64())
            .unwrap_or(Ordering::Equal),
    }
}

/// Returns the dataset in render order: feed order when `selection` is
/// `None`, otherwise sorted by the selected column and direction.
pub fn sorted_assets(assets: &[Asset], selection: Option<SortSelection>) -> Vec<Asset> {
    let mut ordered = assets.to_vec();
    if let Some(selection) = selection {
        ordered.sort_by(|a, b| {
            let cmp = compare(a, b, selection.key);
            match selection.direction {
                SortDirection::Ascending => cmp,
                SortDirection::Descending => cmp.reverse(),
            }
        });
    }
    ordered
}

fn header_label(key: SortKey, selection: Option<SortSelection>) -> String {
    let indicator = match selection {
        Some(s) if s.key == key => match s.direction {
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
        },
        _ => "",
    };
    format!("{}{}", key.label(), indicator)
}

/// Builds the table view model for one snapshot.
pub fn build_asset_view(
    snapshot: &AssetSnapshot,
    selection: Option<SortSelection>,
) -> AssetTableView {
    let headers = SortKey::all()
        .iter()
        .map(|&key| header_label(key, selection))
        .collect();

    let rows = sorted_assets(&snapshot.assets, selection)
        .into_iter()
        .map(|asset| {
            let change = asset.change_percent_f64();
            AssetRow {
                change_text: format_decimal(change),
                change_negative: change < 0.0,
                price_text: format_decimal(asset.price_usd_f64()),
                name: asset.name,
            }
        })
        .collect();

    AssetTableView { headers, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::sort::request_sort;

    fn asset(name: &str, price: &str, change: &str) -> Asset {
        Asset {
            name: name.to_string(),
            price_usd: price.to_string(),
            change_percent24_hr: change.to_string(),
            ..Asset::default()
        }
    }

    fn names(assets: &[Asset]) -> Vec<&str> {
        assets.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn no_selection_keeps_feed_order() {
        let data = vec![
            asset("Zcash", "1", "0"),
            asset("Aave", "2", "0"),
            asset("Monero", "3", "0"),
        ];
        assert_eq!(names(&sorted_assets(&data, None)), ["Zcash", "Aave", "Monero"]);
    }

    #[test]
    fn price_sorts_numerically_not_lexically() {
        let data = vec![
            asset("a", "1.5", "0"),
            asset("b", "0.25", "0"),
            asset("c", "10", "0"),
        ];
        let selection = request_sort(None, SortKey::PriceUsd);
        let sorted = sorted_assets(&data, Some(selection));
        let prices: Vec<&str> = sorted.iter().map(|a| a.price_usd.as_str()).collect();
        assert_eq!(prices, ["0.25", "1.5", "10"]);
    }

    #[test]
    fn descending_reverses_the_order() {
        let data = vec![asset("a", "1.5", "0"), asset("b", "0.25", "0")];
        let asc = request_sort(None, SortKey::PriceUsd);
        let desc = request_sort(Some(asc), SortKey::PriceUsd);
        let sorted = sorted_assets(&data, Some(desc));
        assert_eq!(names(&sorted), ["a", "b"]);
    }

    #[test]
    fn name_sorts_as_raw_text() {
        let data = vec![
            asset("bitcoin", "0", "0"),
            asset("Bitcoin", "0", "0"),
            asset("Aave", "0", "0"),
        ];
        let selection = request_sort(None, SortKey::Name);
        let sorted = sorted_assets(&data, Some(selection));
        // Byte order: uppercase before lowercase.
        assert_eq!(names(&sorted), ["Aave", "Bitcoin", "bitcoin"]);
    }

    #[test]
    fn sort_request_equals_direct_ascending_application() {
        let data = vec![
            asset("c", "10", "0"),
            asset("a", "1.5", "0"),
            asset("b", "0.25", "0"),
        ];
        let via_request = sorted_assets(&data, Some(request_sort(None, SortKey::PriceUsd)));
        let direct = sorted_assets(
            &data,
            Some(SortSelection {
                key: SortKey::PriceUsd,
                direction: SortDirection::Ascending,
            }),
        );
        assert_eq!(via_request, direct);
    }

    #[test]
    fn change_column_sorts_on_parsed_value() {
        let data = vec![
            asset("a", "0", "5.5"),
            asset("b", "0", "-2.0"),
            asset("c", "0", "0.1"),
        ];
        let selection = request_sort(None, SortKey::ChangePercent24Hr);
        let sorted = sorted_assets(&data, Some(selection));
        assert_eq!(names(&sorted), ["b", "c", "a"]);
    }

    #[test]
    fn unparsable_numbers_do_not_panic_and_valid_ones_stay_ordered() {
        let data = vec![
            asset("good-high", "10", "0"),
            asset("bad", "not-a-number", "0"),
            asset("good-low", "0.25", "0"),
        ];
        let selection = request_sort(None, SortKey::PriceUsd);
        let sorted = sorted_assets(&data, Some(selection));
        let low = sorted.iter().position(|a| a.name == "good-low").unwrap();
        let high = sorted.iter().position(|a| a.name == "good-high").unwrap();
        // NaN placement is not pinned; valid records still order correctly.
        assert!(low < high);
        assert_eq!(sorted.len(), 3);
    }

    #[test]
    fn view_headers_mark_the_sorted_column() {
        let snapshot = AssetSnapshot {
            timestamp: 0,
            assets: vec![asset("Bitcoin", "1.5", "-0.5")],
        };

        let view = build_asset_view(&snapshot, None);
        assert_eq!(view.headers, ["Name", "Change 24h (%)", "Price USD"]);

        let asc = request_sort(None, SortKey::PriceUsd);
        let view = build_asset_view(&snapshot, Some(asc));
        assert_eq!(view.headers[2], "Price USD ▲");

        let desc = request_sort(Some(asc), SortKey::PriceUsd);
        let view = build_asset_view(&snapshot, Some(desc));
        assert_eq!(view.headers[2], "Price USD ▼");
        assert_eq!(view.headers[0], "Name");
    }

    #[test]
    fn rows_format_to_five_decimals_and_flag_negative_change() {
        let snapshot = AssetSnapshot {
            timestamp: 0,
            assets: vec![asset("Bitcoin", "67123.4567891", "-1.2"), asset("Tether", "1", "0")],
        };
        let view = build_asset_view(&snapshot, None);

        assert_eq!(view.rows[0].price_text, "67123.45679");
        assert_eq!(view.rows[0].change_text, "-1.20000");
        assert!(view.rows[0].change_negative);

        assert_eq!(view.rows[1].price_text, "1.00000");
        assert!(!view.rows[1].change_negative);
    }
}
