//! Sort selection and the header-activation rule.

/// Sortable columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    ChangePercent24Hr,
    PriceUsd,
}

impl SortKey {
    /// Columns in display order.
    pub fn all() -> &'static [SortKey] {
        &[SortKey::Name, SortKey::ChangePercent24Hr, SortKey::PriceUsd]
    }

    /// Column header label.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "Name",
            SortKey::ChangePercent24Hr => "Change 24h (%)",
            SortKey::PriceUsd => "Price USD",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The user's current column choice. `None` means feed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSelection {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Header activation: a new column starts ascending; the same column flips
/// direction. Two-state toggle -- once a column has been chosen there is no
/// path back to feed order.
pub fn request_sort(current: Option<SortSelection>, key: SortKey) -> SortSelection {
    match current {
        Some(selection) if selection.key == key => SortSelection {
            key,
            direction: selection.direction.flipped(),
        },
        _ => SortSelection {
            key,
            direction: SortDirection::Ascending,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_activation_is_ascending() {
        let selection = request_sort(None, SortKey::PriceUsd);
        assert_eq!(selection.key, SortKey::PriceUsd);
        assert_eq!(selection.direction, SortDirection::Ascending);
    }

    #[test]
    fn same_key_cycles_ascending_descending_ascending() {
        let first = request_sort(None, SortKey::Name);
        let second = request_sort(Some(first), SortKey::Name);
        let third = request_sort(Some(second), SortKey::Name);

        assert_eq!(first.direction, SortDirection::Ascending);
        assert_eq!(second.direction, SortDirection::Descending);
        assert_eq!(third.direction, SortDirection::Ascending);
    }

    #[test]
    fn switching_key_resets_to_ascending() {
        let price_desc = request_sort(
            Some(request_sort(None, SortKey::PriceUsd)),
            SortKey::PriceUsd,
        );
        assert_eq!(price_desc.direction, SortDirection::Descending);

        let name = request_sort(Some(price_desc), SortKey::Name);
        assert_eq!(name.key, SortKey::Name);
        assert_eq!(name.direction, SortDirection::Ascending);
    }
}
