//! The password form guarding the admin dashboard.

use maud::{Markup, html};

use crate::{
    alert::Alert,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, PAGE_CONTAINER_STYLE, base, loading_spinner,
        password_input,
    },
    navigation::NavBar,
};

/// The id of the element the dashboard and password notices are swapped into.
pub const ADMIN_CONTENT_ID: &str = "admin-content";

/// The notice shown until a password has been entered.
pub const AWAITING_PASSWORD_MESSAGE: &str = "Veuillez entrer votre mot de passe.";

/// Display the admin page with the password form and no dashboard.
pub async fn get_admin_page() -> Markup {
    admin_view()
}

fn admin_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::ADMIN_VIEW).into_html();
    let spinner = loading_spinner();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-6" { "Admin Space" }

            div class=(FORM_CONTAINER_STYLE)
            {
                form
                    hx-post=(endpoints::ADMIN_API)
                    hx-target={ "#" (ADMIN_CONTENT_ID) }
                    hx-target-error={ "#" (ADMIN_CONTENT_ID) }
                    class="w-full space-y-4 md:space-y-6"
                {
                    (password_input("Mot de passe"))

                    button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                    {
                        span id="indicator" class="inline htmx-indicator" { (spinner) }
                        " Valider"
                    }
                }
            }

            div id=(ADMIN_CONTENT_ID) class="w-full flex flex-col items-center mt-6"
            {
                (Alert::warning(AWAITING_PASSWORD_MESSAGE).into_html())
            }
        }
    };

    base("Admin Space", &content)
}
