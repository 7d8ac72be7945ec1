//! Fixed reply texts: pseudo-category replies, validation and apology messages.

/// Returned when the trimmed message is empty.
pub const EMPTY_MESSAGE_REPLY: &str = "请输入您要咨询的文物问题";

/// Returned when the request body is not a usable JSON object.
pub const INVALID_PAYLOAD_REPLY: &str = "请提供有效的JSON数据";

/// Returned for any internal failure caught at the responder boundary.
pub const APOLOGY_REPLY: &str = "❌ 抱歉，服务暂时遇到问题，请稍后重试。";

/// Prefix of the closing advisory line of every knowledge reply.
pub const TIP_PREFIX: &str = "💡 **温馨提示**: ";

/// Generic authentication guide: five identification factors plus a submission checklist.
pub const AUTHENTICATION_GUIDE: &str = r#"🔍 **文物鉴定综合指南**

**鉴定五大要素**:
1️⃣ **材质分析** - 通过科学仪器检测材料成分和年代
2️⃣ **工艺特征** - 观察制作工艺是否符合时代特点
3️⃣ **艺术风格** - 对比同时期同类文物的艺术特征
4️⃣ **款识考证** - 研究款识、铭文的时代特征和内容
5️⃣ **传承脉络** - 了解文物的收藏历史和流传经历

**建议步骤**:
• 提供清晰的多角度照片
• 描述文物的具体尺寸和重量
• 说明获得途径和已知历史
• 必要时寻求专业检测机构帮助

💎 **专业建议**: 珍贵文物建议找国家认可的鉴定机构进行科学检测。"#;

pub const GREETING_REPLY: &str = "👋 您好！我是文鉴通助手，专注于文物鉴定的专业AI助手。我可以为您提供：\n\n• 🏺 陶瓷类文物鉴定\n• ⚱️ 青铜器鉴定  \n• 🖼️ 书画类鉴定\n• 💎 玉器类鉴定\n• 🔍 综合鉴定方法\n\n请告诉我您想了解的具体文物类型或鉴定问题！";

pub const THANKS_REPLY: &str = "🙏 不客气！能为您提供文物鉴定方面的帮助是我的荣幸。如果您还有其他问题，随时欢迎咨询！";

/// Menu returned when no rule matches.
pub const FALLBACK_REPLY: &str = "🤔 **文物鉴定咨询**\n\n我主要擅长以下文物类型的鉴定咨询：\n\n**🏺 陶瓷类**\n• 青花瓷年代鉴定\n• 彩瓷真伪辨别\n• 陶器工艺分析\n\n**⚱️ 金属类**  \n• 青铜器时代判断\n• 铜器工艺特征\n• 金银器材质鉴定\n\n**🖼️ 书画类**\n• 字画年代判断\n• 画家风格识别\n• 纸质材质分析\n\n**💎 玉器类**\n• 玉材质地鉴定\n• 雕工时代特征\n• 沁色自然判断\n\n**🔍 请具体描述**：\n您想鉴定的文物类型、特征和具体问题，我会给您专业的解答！";
