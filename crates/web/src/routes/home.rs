//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;

// =============================================================================
// Hero Configuration (Static content for the landing banner)
// =============================================================================

/// A single slide in the hero banner.
#[derive(Clone)]
pub struct HeroSlide {
    pub eyebrow: Option<String>,
    pub title: String,
    pub subtitle: Option<String>,
    pub button_text: Option<String>,
    pub button_url: Option<String>,
    pub image_path: String,
    pub image_alt: String,
}

/// Hero banner configuration.
#[derive(Clone)]
pub struct HeroConfig {
    pub slides: Vec<HeroSlide>,
    pub autoplay_ms: Option<u32>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            slides: vec![
                HeroSlide {
                    eyebrow: Some("Door to door, port to port".to_string()),
                    title: "Freight that arrives when we say it will".to_string(),
                    subtitle: Some(
                        "Ocean, air and road freight with live tracking on every shipment."
                            .to_string(),
                    ),
                    button_text: Some("Track a Shipment".to_string()),
                    button_url: Some("/tracking".to_string()),
                    image_path: "/static/images/hero/containers.jpg".to_string(),
                    image_alt: "Container terminal at dawn".to_string(),
                },
                HeroSlide {
                    eyebrow: None,
                    title: "Cold chain, heavy lift, hazardous — handled".to_string(),
                    subtitle: Some(
                        "Specialist teams for the cargo other carriers turn away.".to_string(),
                    ),
                    button_text: Some("Our Services".to_string()),
                    button_url: Some("/#services".to_string()),
                    image_path: "/static/images/hero/reefer.jpg".to_string(),
                    image_alt: "Refrigerated trailer on the motorway".to_string(),
                },
            ],
            autoplay_ms: Some(6000),
        }
    }
}

// =============================================================================
// Services and Achievements (Static content)
// =============================================================================

/// A service card on the landing page.
#[derive(Clone)]
pub struct ServiceCard {
    pub icon: String,
    pub title: String,
    pub description: String,
}

/// A headline number in the achievements band.
#[derive(Clone)]
pub struct Achievement {
    pub value: String,
    pub label: String,
}

fn get_services() -> Vec<ServiceCard> {
    vec![
        ServiceCard {
            icon: "ship".to_string(),
            title: "Ocean Freight".to_string(),
            description: "FCL and LCL sailings on all major trade lanes, with weekly departures from Rotterdam and Singapore.".to_string(),
        },
        ServiceCard {
            icon: "plane".to_string(),
            title: "Air Freight".to_string(),
            description: "Next-flight-out and consolidated air cargo when the schedule cannot slip.".to_string(),
        },
        ServiceCard {
            icon: "truck".to_string(),
            title: "Road Haulage".to_string(),
            description: "Full and part loads across Europe with a fleet we drive ourselves.".to_string(),
        },
        ServiceCard {
            icon: "warehouse".to_string(),
            title: "Warehousing".to_string(),
            description: "Bonded storage, pick and pack, and cross-docking at our three hubs.".to_string(),
        },
    ]
}

fn get_achievements() -> Vec<Achievement> {
    vec![
        Achievement {
            value: "12,400+".to_string(),
            label: "Shipments delivered".to_string(),
        },
        Achievement {
            value: "38".to_string(),
            label: "Countries served".to_string(),
        },
        Achievement {
            value: "99.1%".to_string(),
            label: "On-time arrival".to_string(),
        },
        Achievement {
            value: "24/7".to_string(),
            label: "Operations desk".to_string(),
        },
    ]
}

// =============================================================================
// Template
// =============================================================================

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Hero banner configuration.
    pub hero: HeroConfig,
    /// Service cards.
    pub services: Vec<ServiceCard>,
    /// Achievements band.
    pub achievements: Vec<Achievement>,
    /// Logged-in user, for the nav bar.
    pub current_user: Option<CurrentUser>,
}

/// Display the home page.
pub async fn home(OptionalAuth(current_user): OptionalAuth) -> impl IntoResponse {
    HomeTemplate {
        hero: HeroConfig::default(),
        services: get_services(),
        achievements: get_achievements(),
        current_user,
    }
}
