use payloads::{BrandId, requests::ProductFilter, responses::EthicsQuestionnaire};
use yew::prelude::*;

use crate::hooks::{use_brand, use_ethics_questionnaire, use_title};
use crate::pages::home::ProductListing;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub brand_id: BrandId,
}

#[function_component]
pub fn BrandDetailPage(props: &Props) -> Html {
    let brand = use_brand(props.brand_id);
    let title = brand
        .data()
        .and_then(Option::as_ref)
        .map_or_else(|| "Brand".to_string(), |brand| brand.name.clone());
    use_title(&title);

    html! {
        <div class="space-y-10">
            {brand.render("brand", |brand, _| match brand {
                Some(brand) => html! {
                    <header class="flex items-center gap-6">
                        if let Some(logo) = &brand.logo_url {
                            <img src={logo.clone()} alt={brand.name.clone()}
                                class="h-20 w-20 object-contain" />
                        }
                        <div>
                            <h1 class="text-3xl font-bold">{&brand.name}</h1>
                            if let Some(description) = &brand.description {
                                <p class="mt-2 text-neutral-600 dark:text-neutral-400">
                                    {description}
                                </p>
                            }
                        </div>
                    </header>
                },
                None => html! {},
            })}
            <EthicsSection brand_id={props.brand_id} />
            <section>
                <h2 class="text-xl font-semibold mb-4">{"Products"}</h2>
                // Keyed so that moving to another brand starts a fresh listing
                <ProductListing
                    key={props.brand_id.to_string()}
                    filter={ProductFilter::for_brand(props.brand_id)}
                />
            </section>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct EthicsSectionProps {
    brand_id: BrandId,
}

#[function_component]
fn EthicsSection(props: &EthicsSectionProps) -> Html {
    let questionnaire = use_ethics_questionnaire(props.brand_id);

    html! {
        <section>
            <h2 class="text-xl font-semibold mb-4">{"Ethics questionnaire"}</h2>
            {questionnaire.render("ethics questionnaire", |answers, _| {
                render_questionnaire(answers.as_ref())
            })}
        </section>
    }
}

fn render_questionnaire(questionnaire: Option<&EthicsQuestionnaire>) -> Html {
    let Some(questionnaire) = questionnaire else {
        return html! {
            <p class="text-neutral-600 dark:text-neutral-400">
                {"This brand has not answered the questionnaire yet."}
            </p>
        };
    };

    html! {
        <dl class="space-y-3">
            {for questionnaire.answers.iter().map(|answer| html! {
                <div>
                    <dt class="font-medium">{&answer.question}</dt>
                    <dd class="text-neutral-600 dark:text-neutral-400">{&answer.answer}</dd>
                </div>
            })}
            if let Some(submitted_at) = questionnaire.submitted_at {
                <p class="text-xs text-neutral-500">
                    {format!("Submitted {}", submitted_at.strftime("%Y-%m-%d"))}
                </p>
            }
        </dl>
    }
}
