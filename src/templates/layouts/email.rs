use maud::{html, Markup, DOCTYPE};

// Mail clients drop <link> and most <style>, so everything is inline.
pub fn email_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
            }
            body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;" {
                div style="max-width: 600px; margin: 0 auto; padding: 20px;" {
                    h2 { (title) }
                    (content)
                    hr style="margin-top: 30px; border: none; border-top: 1px solid #eee;";
                    p style="font-size: 0.8em; color: #999;" {
                        "Sent by the daily inventory check. Prices are as listed at the time of the run."
                    }
                }
            }
        }
    }
}
