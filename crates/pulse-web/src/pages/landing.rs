//! Landing Page

use leptos::prelude::*;

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="landing">
            <nav class="topbar">
                <span class="brand">"✨ CryptoPulse"</span>
                <div class="cta">
                    <a href="/login" class="btn btn-ghost">"Login"</a>
                    <a href="/onboarding" class="btn btn-primary">"Get Started"</a>
                </div>
            </nav>

            <header class="hero">
                <span class="badge">"⚡ AI-Powered Crypto Intelligence"</span>
                <h1>"Your Personalized " <span class="gradient">"Crypto Dashboard"</span></h1>
                <p class="tagline">
                    "Get AI-curated market insights, real-time prices, and trending news tailored to your investment style."
                </p>
                <a href="/onboarding" class="btn btn-primary btn-lg">"Start Free →"</a>
            </header>

            <section class="features">
                <div class="feature">
                    <h3>"📈 Live Market Data"</h3>
                    <p>"Real-time crypto prices and market trends from CoinGecko."</p>
                </div>
                <div class="feature">
                    <h3>"⚡ AI-Powered Insights"</h3>
                    <p>"A daily AI-generated take on the market."</p>
                </div>
                <div class="feature">
                    <h3>"🛡️ Personalized Feed"</h3>
                    <p>"Content curated based on your interests, investment style, and feedback."</p>
                </div>
            </section>
        </div>
    }
}
