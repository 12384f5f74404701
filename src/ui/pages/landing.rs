//! Landing page component
//!
//! A single scrolling page that collects waitlist signups:
//! - SEO meta tags
//! - Hero section with the live waitlist count and a signup form
//! - Problem, solution and how-it-works sections revealed on scroll
//! - Testimonials
//! - Final call-to-action with a second form and a success panel
//! - Footer

use leptos::prelude::*;
use leptos_meta::{Meta, Title};

use crate::ui::{AnchorLink, CtaButton, PageTracker, WaitlistCount, WaitlistForm};

/// Anchor of the final signup section
const SIGNUP_ANCHOR: &str = "#signup";

/// Landing page component
#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <SeoMeta />

        <div class="landing">
            <Header />

            // Hero Section
            <section id="hero" class="hero">
                <div class="container">
                    <h1 class="hero-title">"Stop losing hours to status meetings"</h1>
                    <p class="hero-subtitle">
                        "Async standups that write themselves. Be the first to try it when we launch."
                    </p>

                    <WaitlistForm form_id="hero-form" location="hero" />

                    <p class="waitlist-social-proof">
                        <WaitlistCount id="waitlistCount" class="waitlist-count" />
                        " people are already on the waitlist"
                    </p>
                </div>
            </section>

            // Problem Section
            <section id="problem" class="section section-muted">
                <div class="container">
                    <h2 class="section-title reveal-on-scroll">"Meetings that could have been a message"</h2>
                    <div class="card-grid">
                        <InfoCard
                            title="Context switching"
                            description="Every sync call breaks a block of focused work into pieces."
                        />
                        <InfoCard
                            title="Time zones"
                            description="Someone is always joining at dawn or staying late."
                        />
                        <InfoCard
                            title="Lost updates"
                            description="What was said in the call rarely makes it into writing."
                        />
                    </div>
                </div>
            </section>

            // Solution Section
            <section id="solution" class="section">
                <div class="container">
                    <h2 class="section-title reveal-on-scroll">"Updates on your schedule"</h2>
                    <div class="card-grid">
                        <InfoCard
                            title="Written by your tools"
                            description="Commits, tickets and reviews become a draft update you only need to approve."
                        />
                        <InfoCard
                            title="Read in minutes"
                            description="One digest per team, delivered when each person starts their day."
                        />
                        <InfoCard
                            title="Searchable history"
                            description="Every update is kept, so nothing depends on someone's memory."
                        />
                    </div>
                    <div class="section-cta reveal-on-scroll">
                        <CtaButton label="Get early access" href=SIGNUP_ANCHOR section="solution" />
                    </div>
                </div>
            </section>

            // How It Works Section
            <section id="how-it-works" class="section section-muted">
                <div class="container">
                    <h2 class="section-title reveal-on-scroll">"How it works"</h2>
                    <ol class="steps">
                        <StepCard number=1 title="Connect" description="Link your repository and issue tracker." />
                        <StepCard number=2 title="Review" description="Approve or edit the drafted update." />
                        <StepCard number=3 title="Share" description="Your team gets one digest, no meeting needed." />
                    </ol>
                </div>
            </section>

            // Testimonials Section
            <section id="testimonials" class="section">
                <div class="container">
                    <h2 class="section-title reveal-on-scroll">"What early testers say"</h2>
                    <div class="card-grid">
                        <Testimonial
                            quote="We cancelled our daily standup in the first week."
                            author="Engineering lead, 12-person team"
                        />
                        <Testimonial
                            quote="Finally an update format people actually read."
                            author="Product manager"
                        />
                    </div>
                </div>
            </section>

            // Final CTA Section
            <section id="signup" class="section section-accent">
                <div class="container">
                    <h2 class="section-title reveal-on-scroll">"Join the waitlist"</h2>
                    <p class="section-subtitle">
                        <WaitlistCount id="finalWaitlistCount" class="waitlist-count" />
                        " people have signed up so far. Early members get three months free."
                    </p>
                    <WaitlistForm form_id="final-form" location="final_cta" success_panel=true />
                </div>
            </section>

            <Footer />

            <PageTracker />
        </div>
    }
}

/// Header with in-page navigation
#[component]
fn Header() -> impl IntoView {
    view! {
        <header class="site-header">
            <div class="container header-row">
                <a href="/" class="brand">"Standup"</a>
                <nav class="nav">
                    <AnchorLink href="#problem">"Why"</AnchorLink>
                    <AnchorLink href="#how-it-works">"How it works"</AnchorLink>
                    <AnchorLink href="#testimonials">"Testimonials"</AnchorLink>
                    <CtaButton label="Join waitlist" href=SIGNUP_ANCHOR section="header" class="cta-small" />
                </nav>
            </div>
        </header>
    }
}

#[component]
fn InfoCard(title: &'static str, description: &'static str) -> impl IntoView {
    view! {
        <div class="card reveal-on-scroll">
            <h3 class="card-title">{title}</h3>
            <p class="card-text">{description}</p>
        </div>
    }
}

#[component]
fn StepCard(number: u8, title: &'static str, description: &'static str) -> impl IntoView {
    view! {
        <li class="step reveal-on-scroll">
            <span class="step-number">{number}</span>
            <h3 class="card-title">{title}</h3>
            <p class="card-text">{description}</p>
        </li>
    }
}

#[component]
fn Testimonial(quote: &'static str, author: &'static str) -> impl IntoView {
    view! {
        <figure class="card testimonial reveal-on-scroll">
            <blockquote>{quote}</blockquote>
            <figcaption>{author}</figcaption>
        </figure>
    }
}

/// SEO meta tags using leptos_meta
#[component]
fn SeoMeta() -> impl IntoView {
    view! {
        <Title text="Standup - Async standups that write themselves" />
        <Meta name="description" content="Replace status meetings with drafted async updates. Join the waitlist for early access." />

        // Open Graph
        <Meta property="og:type" content="website" />
        <Meta property="og:title" content="Standup - Async standups that write themselves" />
        <Meta property="og:description" content="Replace status meetings with drafted async updates." />
    }
}

#[component]
fn Footer() -> impl IntoView {
    view! {
        <footer class="site-footer">
            <div class="container footer-row">
                <span>"© 2025 Standup"</span>
                <AnchorLink href="#hero">"Back to top"</AnchorLink>
            </div>
        </footer>
    }
}
