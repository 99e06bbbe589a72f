use maud::{Markup, html};

use crate::{
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    suggestion::{CATEGORIES, Suggestion},
};

/// The ID of the element that is replaced when a new suggestion arrives.
pub(super) const CATEGORY_SELECT_ID: &str = "category-select";

/// The category selector with the suggested category pre-selected.
///
/// A suggestion that is not one of [CATEGORIES] is added as an extra option.
pub(super) fn category_select(suggestion: &Suggestion) -> Markup {
    let suggested = suggestion.category();
    let is_extra = !CATEGORIES.contains(&suggested);

    html!(
        div id=(CATEGORY_SELECT_ID)
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category"
                id="category"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for category in CATEGORIES {
                    option value=(category) selected[category == suggested] { (category) }
                }

                @if is_extra {
                    option value=(suggested) selected { (suggested) }
                }
            }

            @if let Suggestion::Predicted(category) = suggestion {
                p class="mt-1 text-sm text-gray-500 dark:text-gray-400"
                {
                    "Suggested from similar descriptions: " (category)
                }
            }
        }
    )
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::suggestion::{FallbackReason, Suggestion};

    use super::category_select;

    fn selected_options(html: &Html) -> Vec<String> {
        html.select(&Selector::parse("option[selected]").unwrap())
            .map(|option| option.value().attr("value").unwrap_or_default().to_owned())
            .collect()
    }

    #[test]
    fn preselects_predicted_category() {
        let suggestion = Suggestion::Predicted("Transporte".to_owned());

        let html = Html::parse_fragment(&category_select(&suggestion).into_string());

        assert_eq!(selected_options(&html), vec!["Transporte"]);
        let options = html.select(&Selector::parse("option").unwrap()).count();
        assert_eq!(options, 4);
    }

    #[test]
    fn fallback_preselects_default_category() {
        let suggestion = Suggestion::Fallback(FallbackReason::EmptyLedger);

        let html = Html::parse_fragment(&category_select(&suggestion).into_string());

        assert_eq!(selected_options(&html), vec!["Outros"]);
        assert!(html.select(&Selector::parse("p").unwrap()).next().is_none());
    }

    #[test]
    fn keeps_suggestion_outside_fixed_categories() {
        let suggestion = Suggestion::Predicted("Saúde".to_owned());

        let html = Html::parse_fragment(&category_select(&suggestion).into_string());

        assert_eq!(selected_options(&html), vec!["Saúde"]);
        let options = html.select(&Selector::parse("option").unwrap()).count();
        assert_eq!(options, 5);
    }
}
