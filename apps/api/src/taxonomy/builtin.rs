// Built-in skill reference table: (canonical name, category, aliases).
// Aliases are compared after surface normalization, so "React.js" or
// "communication skills" need no entry of their own.

use crate::models::skill::SkillCategory::{self, *};

pub(super) const BUILTIN_SKILLS: &[(&str, SkillCategory, &[&str])] = &[
    // programming languages
    ("Python", ProgrammingLanguages, &["py", "python3"]),
    ("JavaScript", ProgrammingLanguages, &["js", "ecmascript", "es6"]),
    ("TypeScript", ProgrammingLanguages, &["ts"]),
    ("Java", ProgrammingLanguages, &["java se", "java ee", "core java"]),
    ("C++", ProgrammingLanguages, &["cpp", "cplusplus", "c plus plus", "cxx"]),
    ("C#", ProgrammingLanguages, &["csharp", "c sharp"]),
    ("C", ProgrammingLanguages, &[]),
    ("Go", ProgrammingLanguages, &["golang"]),
    ("Rust", ProgrammingLanguages, &["rustlang"]),
    ("Ruby", ProgrammingLanguages, &[]),
    ("PHP", ProgrammingLanguages, &[]),
    ("Swift", ProgrammingLanguages, &[]),
    ("Kotlin", ProgrammingLanguages, &[]),
    ("Scala", ProgrammingLanguages, &[]),
    ("R", ProgrammingLanguages, &["r language", "r programming"]),
    ("MATLAB", ProgrammingLanguages, &[]),
    ("SQL", ProgrammingLanguages, &["structured query language"]),
    ("Bash", ProgrammingLanguages, &["shell scripting", "shell", "bash scripting"]),
    ("Perl", ProgrammingLanguages, &[]),
    ("Dart", ProgrammingLanguages, &[]),
    ("Elixir", ProgrammingLanguages, &[]),
    ("Haskell", ProgrammingLanguages, &[]),
    // frameworks & libraries
    ("React", FrameworksLibraries, &["reactjs"]),
    ("React Native", FrameworksLibraries, &[]),
    ("Angular", FrameworksLibraries, &["angularjs", "angular2"]),
    ("Vue", FrameworksLibraries, &["vuejs", "vue3"]),
    ("Node.js", FrameworksLibraries, &["nodejs", "node js"]),
    ("Express", FrameworksLibraries, &["expressjs"]),
    ("Next.js", FrameworksLibraries, &["nextjs"]),
    ("Django", FrameworksLibraries, &[]),
    ("Flask", FrameworksLibraries, &[]),
    ("FastAPI", FrameworksLibraries, &["fast api"]),
    ("Spring Boot", FrameworksLibraries, &["springboot", "spring"]),
    ("Ruby on Rails", FrameworksLibraries, &["rails", "ror"]),
    ("Laravel", FrameworksLibraries, &[]),
    (".NET", FrameworksLibraries, &["dotnet", "dot net", ".net core", "asp.net"]),
    ("TensorFlow", FrameworksLibraries, &[]),
    ("PyTorch", FrameworksLibraries, &["torch"]),
    ("scikit-learn", FrameworksLibraries, &["sklearn", "scikit"]),
    ("Pandas", FrameworksLibraries, &[]),
    ("NumPy", FrameworksLibraries, &[]),
    // tools & platforms
    ("Git", ToolsPlatforms, &["git scm", "version control"]),
    ("GitHub", ToolsPlatforms, &[]),
    ("GitLab", ToolsPlatforms, &[]),
    ("Docker", ToolsPlatforms, &["docker compose", "containerization"]),
    ("Jira", ToolsPlatforms, &[]),
    ("Postman", ToolsPlatforms, &[]),
    ("Linux", ToolsPlatforms, &["unix"]),
    // databases
    ("PostgreSQL", Databases, &["postgres", "psql"]),
    ("MySQL", Databases, &[]),
    ("MongoDB", Databases, &["mongo"]),
    ("Redis", Databases, &[]),
    ("SQLite", Databases, &[]),
    ("Oracle", Databases, &["oracle database", "oracle db"]),
    ("SQL Server", Databases, &["mssql", "microsoft sql server", "sqlserver"]),
    ("Elasticsearch", Databases, &["elastic search"]),
    ("Cassandra", Databases, &["apache cassandra"]),
    ("DynamoDB", Databases, &["dynamo db", "aws dynamodb"]),
    // cloud
    ("AWS", CloudServices, &["amazon web services", "amazon aws"]),
    ("Azure", CloudServices, &["microsoft azure"]),
    ("GCP", CloudServices, &["google cloud", "google cloud platform"]),
    ("Heroku", CloudServices, &[]),
    // devops
    ("Kubernetes", Devops, &["k8s"]),
    ("Terraform", Devops, &[]),
    ("Ansible", Devops, &[]),
    ("Jenkins", Devops, &[]),
    ("GitHub Actions", Devops, &[]),
    ("Prometheus", Devops, &[]),
    ("Grafana", Devops, &[]),
    ("DevOps", Devops, &["dev ops"]),
    // ci/cd
    (
        "CI/CD",
        CiCd,
        &[
            "cicd",
            "ci cd",
            "continuous integration",
            "continuous deployment",
            "continuous delivery",
        ],
    ),
    // architecture
    (
        "Microservices",
        SoftwareArchitecture,
        &["micro services", "microservice", "microservice architecture"],
    ),
    (
        "REST APIs",
        SoftwareArchitecture,
        &["rest", "rest api", "restful", "restful api", "restful apis"],
    ),
    ("GraphQL", SoftwareArchitecture, &[]),
    ("System Design", SoftwareArchitecture, &[]),
    ("Design Patterns", SoftwareArchitecture, &[]),
    ("Event-Driven Architecture", SoftwareArchitecture, &["event driven"]),
    // machine learning
    ("Machine Learning", MachineLearning, &["ml"]),
    ("Deep Learning", MachineLearning, &["dl", "neural networks"]),
    ("NLP", MachineLearning, &["natural language processing"]),
    ("Computer Vision", MachineLearning, &[]),
    ("LLMs", MachineLearning, &["llm", "large language models"]),
    // data science
    ("Data Analysis", DataScience, &["data analytics"]),
    ("Statistics", DataScience, &[]),
    ("Data Visualization", DataScience, &[]),
    ("ETL", DataScience, &["extract transform load"]),
    ("Data Science", DataScience, &[]),
    // blockchain
    ("Solidity", Blockchain, &[]),
    ("Ethereum", Blockchain, &[]),
    ("Smart Contracts", Blockchain, &["smart contract"]),
    ("Web3", Blockchain, &[]),
    // security
    (
        "Cybersecurity",
        Cybersecurity,
        &["cyber security", "information security", "infosec"],
    ),
    (
        "Penetration Testing",
        Cybersecurity,
        &["pentesting", "pen testing", "pentest"],
    ),
    ("OWASP", Cybersecurity, &[]),
    ("Encryption", Cybersecurity, &["cryptography"]),
    // industry domains
    ("Fintech", Fintech, &["financial technology"]),
    ("Payment Systems", Fintech, &["payments", "payment processing"]),
    ("HIPAA", HealthcareIt, &["hipaa compliance"]),
    ("EHR", HealthcareIt, &["electronic health records"]),
    ("E-commerce", ECommerce, &["ecommerce", "online retail"]),
    // soft skills
    (
        "Leadership",
        Leadership,
        &["team leadership", "people management", "team management"],
    ),
    ("Mentoring", Leadership, &["mentorship", "coaching"]),
    ("Project Management", Leadership, &[]),
    (
        "Communication",
        Communication,
        &[
            "verbal communication",
            "written communication",
            "interpersonal communication",
        ],
    ),
    ("Technical Writing", Communication, &["documentation"]),
    ("Public Speaking", Communication, &["presentations", "presenting"]),
    (
        "Collaboration",
        Collaboration,
        &[
            "teamwork",
            "team collaboration",
            "cross functional collaboration",
            "team player",
        ],
    ),
    (
        "Stakeholder Management",
        Collaboration,
        &["stakeholder communication"],
    ),
    (
        "Problem Solving",
        ProblemSolving,
        &["troubleshooting", "debugging", "problem solver"],
    ),
    (
        "Analytical Thinking",
        AnalyticalThinking,
        &["analytical", "analytical reasoning", "critical thinking"],
    ),
    (
        "Agile",
        Agile,
        &["agile methodology", "agile development", "agile practices"],
    ),
    ("Kanban", Agile, &[]),
    ("Scrum", Scrum, &["scrum methodology", "scrum framework"]),
    ("Design Thinking", DesignThinking, &[]),
    (
        "UX Design",
        DesignThinking,
        &["user experience design", "ui/ux", "ux/ui", "ux"],
    ),
    ("User Research", DesignThinking, &[]),
    ("Prototyping", DesignThinking, &[]),
];
