//! Sample component sources for test projects.
//!
//! `PORTFOLIO` is a small portfolio app: a routed `App`, a `Playground`,
//! two pages, two top-level components, a `primitives` folder, plus files
//! the scanner must skip (router, index, utils, hooks).

/// One source file, relative to the project's `src/` directory
#[derive(Debug, Clone, Copy)]
pub struct SourceFixture {
    pub path: &'static str,
    pub content: &'static str,
}

pub const APP: SourceFixture = SourceFixture {
    path: "app.jsx",
    content: r#"import React, { useEffect } from 'react'
import { Router } from './Router.jsx'

export const App = () => {
  useEffect(() => {
    document.title = 'Portfolio'
  }, [])
  return <Router />
}
"#,
};

pub const ROUTER: SourceFixture = SourceFixture {
    path: "Router.jsx",
    content: r#"import React from 'react'

export const Router = ({ children }) => <div>{children}</div>
"#,
};

pub const INDEX: SourceFixture = SourceFixture {
    path: "index.jsx",
    content: r#"import React from 'react'
import { App } from './app.jsx'

export const Root = () => <App />
"#,
};

pub const UTILS: SourceFixture = SourceFixture {
    path: "utils.jsx",
    content: r#"import React from 'react'

export const FlexCol = ({ children, style, ...props }) => {
  return (
    <div style={{ display: 'flex', flexDirection: 'column', ...style }} {...props}>
      {children}
    </div>
  )
}
"#,
};

pub const HOOK: SourceFixture = SourceFixture {
    path: "hooks/useCaseStudies.js",
    content: r#"import { useState } from 'react'

export const useCaseStudies = () => {
  const [items] = useState([])
  return items
}
"#,
};

pub const HEADER: SourceFixture = SourceFixture {
    path: "components/Header.jsx",
    content: r#"import React from 'react'

export const Header = ({ title = 'Portfolio', style = {} }) => (
  <header style={{ height: '80px', ...style }}>
    <h1>{title}</h1>
  </header>
)
"#,
};

pub const SPINNER: SourceFixture = SourceFixture {
    path: "components/Spinner.jsx",
    content: r#"import React from 'react'

const Spinner = () => (
  <div
    style={{
      display: 'inline-block',
      width: '16px',
      height: '16px',
    }}
  >
  </div>
)

export default Spinner
"#,
};

pub const BUTTON: SourceFixture = SourceFixture {
    path: "components/primitives/Button.jsx",
    content: r#"import React from 'react'

export const Button = ({ children, onClick = () => {}, style = {}, ...props }) => (
  <button style={{ height: '40px', ...style }} onClick={onClick} {...props}>
    {children}
  </button>
)
"#,
};

pub const TAG: SourceFixture = SourceFixture {
    path: "components/primitives/Tag.jsx",
    content: r#"import React from 'react'

export const Tag = ({ children, style = {} }) => {
  return (
    <span style={{ height: '44px', ...style }}>{children}</span>
  )
}
"#,
};

pub const ABOUT_PAGE: SourceFixture = SourceFixture {
    path: "pages/AboutPage.jsx",
    content: r#"import React from 'react'
import { Header } from '../components/Header.jsx'

const AboutPage = () => (
  <main>
    <Header title="About" />
  </main>
)

export default AboutPage
"#,
};

pub const PORTFOLIO_PAGE: SourceFixture = SourceFixture {
    path: "pages/PortfolioPage.jsx",
    content: r#"import React from 'react'

export default function PortfolioPage() {
  return <main>Selected work</main>
}
"#,
};

pub const PLAYGROUND: SourceFixture = SourceFixture {
    path: "playground.jsx",
    content: r#"import React from 'react'

export const Playground = ({ style }) => <div style={style}>play</div>
"#,
};

pub const PORTFOLIO: &[SourceFixture] = &[
    APP,
    ROUTER,
    INDEX,
    UTILS,
    HOOK,
    HEADER,
    SPINNER,
    BUTTON,
    TAG,
    ABOUT_PAGE,
    PORTFOLIO_PAGE,
    PLAYGROUND,
];

/// Component names the scanner finds in `PORTFOLIO`, in discovery order
pub const PORTFOLIO_COMPONENTS: &[&str] = &[
    "App",
    "Header",
    "Spinner",
    "Button",
    "Tag",
    "AboutPage",
    "PortfolioPage",
    "Playground",
];

/// A page with no other content, for tests that add pages on the fly
pub fn page_source(name: &str) -> String {
    format!(
        "import React from 'react'\n\nexport const {} = () => <main>{}</main>\n",
        name, name
    )
}
